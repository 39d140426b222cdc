//! Virtual file handles.
//!
//! A [`VirtualFile`] pairs file metadata with a [`ContentSource`] and exposes
//! the capability set generic file-consuming code expects: `stat`, `read`
//! (also through [`std::io::Read`]), `seek` and `close`. Nothing is held
//! outside the process; closing only rewinds the cursor, so a handle can be
//! replayed any number of times.
//!
//! A handle is meant for one caller at a time: every cursor-moving operation
//! takes `&mut self`. Distinct handles share nothing, including for random
//! content, and may be read concurrently on different threads.
//!
//! # Examples
//!
//! ```
//! use mockfs::{digest, VirtualFile};
//! use mockfs_core::FileMode;
//!
//! let mut file = VirtualFile::random("/test_dir/a.txt", FileMode::ALL, 1024);
//! assert_eq!(file.stat().size, 1024);
//!
//! let first = digest(&mut file).unwrap();
//! file.close();
//! assert_eq!(digest(&mut file).unwrap(), first);
//! ```

use crate::content::{Content, ContentSource, ReadOutcome, SourceKind};
use crate::seed::derive_seed;
use chrono::{DateTime, Utc};
use mockfs_core::{Error, FileMode, GeneratorConfig, PieceSize, Result, Seed};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Seek, SeekFrom};
use tracing::debug;

/// Metadata reported by [`VirtualFile::stat`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Path the handle was created for.
    pub name: String,
    /// Content length in bytes; 0 for directories.
    pub size: u64,
    /// Permission bits.
    pub mode: FileMode,
    /// Modification time, fixed at construction.
    pub mod_time: DateTime<Utc>,
    /// Whether this is a directory handle.
    pub is_directory: bool,
}

/// Read-only virtual file of deterministic content.
#[derive(Debug, Clone)]
pub struct VirtualFile {
    info: FileInfo,
    content: Option<ContentSource>,
}

impl VirtualFile {
    /// Creates a directory handle. Directories carry no content.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockfs::VirtualFile;
    /// use mockfs_core::FileMode;
    ///
    /// let dir = VirtualFile::directory("/data", FileMode::DIR);
    /// assert!(dir.stat().is_directory);
    /// assert_eq!(dir.stat().size, 0);
    /// ```
    #[must_use]
    pub fn directory(path: impl Into<String>, mode: FileMode) -> Self {
        Self::assemble(path.into(), mode, Utc::now(), None)
    }

    /// Creates a file of `size` zero bytes.
    #[must_use]
    pub fn zero(path: impl Into<String>, mode: FileMode, size: u64) -> Self {
        Self::with_source(path, mode, ContentSource::zero(size))
    }

    /// Creates a pseudorandom file keyed by its path, using 1 MiB pieces.
    ///
    /// Two files created for the same path and size hold identical content.
    #[must_use]
    pub fn random(path: impl Into<String>, mode: FileMode, size: u64) -> Self {
        Self::random_with_piece_size(path, mode, size, PieceSize::DEFAULT)
    }

    /// Creates a pseudorandom file keyed by its path with a custom piece size.
    ///
    /// Content depends on the piece size: the same path and size with a
    /// different piece size yields different bytes.
    #[must_use]
    pub fn random_with_piece_size(
        path: impl Into<String>,
        mode: FileMode,
        size: u64,
        piece_size: PieceSize,
    ) -> Self {
        let path = path.into();
        let seed = derive_seed(&path);
        debug!(path = %path, %seed, size, %piece_size, "created random file");
        Self::with_source(path, mode, ContentSource::random(size, seed, piece_size))
    }

    /// Creates a file that reads back `bytes` exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockfs::VirtualFile;
    /// use mockfs_core::FileMode;
    /// use std::io::Read;
    ///
    /// let mut file = VirtualFile::from_buffer("/hello.txt", FileMode::FILE, b"hello".to_vec());
    /// let mut text = String::new();
    /// file.read_to_string(&mut text).unwrap();
    /// assert_eq!(text, "hello");
    /// ```
    #[must_use]
    pub fn from_buffer(path: impl Into<String>, mode: FileMode, bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_source(path, mode, ContentSource::buffer(bytes))
    }

    /// Creates a file over an explicit content source.
    ///
    /// The reported size is always the source's length.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockfs::{ContentSource, VirtualFile};
    /// use mockfs_core::{FileMode, PieceSize, Seed};
    ///
    /// let source = ContentSource::random(4096, Seed::new(42), PieceSize::new(512).unwrap());
    /// let file = VirtualFile::with_source("/seeded.bin", FileMode::FILE, source);
    /// assert_eq!(file.seed(), Some(Seed::new(42)));
    /// ```
    #[must_use]
    pub fn with_source(path: impl Into<String>, mode: FileMode, source: ContentSource) -> Self {
        Self::assemble(path.into(), mode, Utc::now(), Some(source))
    }

    /// Creates a zero or random file using configured piece size and mode.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for [`SourceKind::Buffer`], which
    /// needs caller-supplied bytes (see [`VirtualFile::from_buffer`]).
    pub fn from_config(
        path: impl Into<String>,
        size: u64,
        kind: SourceKind,
        config: &GeneratorConfig,
    ) -> Result<Self> {
        match kind {
            SourceKind::Zero => Ok(Self::zero(path, config.default_mode, size)),
            SourceKind::Random => Ok(Self::random_with_piece_size(
                path,
                config.default_mode,
                size,
                config.piece_size,
            )),
            SourceKind::Buffer => Err(Error::InvalidArgument(
                "buffer content needs explicit bytes".to_string(),
            )),
        }
    }

    pub(crate) fn assemble(
        name: String,
        mode: FileMode,
        mod_time: DateTime<Utc>,
        content: Option<ContentSource>,
    ) -> Self {
        let info = FileInfo {
            name,
            size: content.as_ref().map_or(0, Content::len),
            mode,
            mod_time,
            is_directory: content.is_none(),
        };
        Self { info, content }
    }

    /// Returns the file metadata.
    #[must_use]
    pub const fn stat(&self) -> &FileInfo {
        &self.info
    }

    /// Path the handle was created for.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Content length in bytes.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.info.size
    }

    /// Returns `true` for empty files and directories.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.info.size == 0
    }

    /// Whether this is a directory handle.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.info.is_directory
    }

    /// Content mode, or `None` for directories.
    #[must_use]
    pub fn source_kind(&self) -> Option<SourceKind> {
        self.content.as_ref().map(ContentSource::kind)
    }

    /// Seed of random content, or `None` for other modes.
    #[must_use]
    pub fn seed(&self) -> Option<Seed> {
        self.content.as_ref().and_then(ContentSource::seed)
    }

    /// Current cursor offset (0 for directories).
    #[must_use]
    pub fn position(&self) -> u64 {
        self.content.as_ref().map_or(0, Content::position)
    }

    /// Bytes left before end-of-stream (0 for directories).
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.content.as_ref().map_or(0, Content::remaining)
    }

    /// Reads from the cursor into `buf`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IsADirectory` for directory handles.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockfs::{ReadOutcome, VirtualFile};
    /// use mockfs_core::FileMode;
    ///
    /// let mut file = VirtualFile::zero("/z", FileMode::FILE, 3);
    /// let mut buf = [1u8; 8];
    ///
    /// assert_eq!(file.read_chunk(&mut buf).unwrap(), ReadOutcome::Data(3));
    /// assert_eq!(file.read_chunk(&mut buf).unwrap(), ReadOutcome::EndOfStream);
    /// ```
    pub fn read_chunk(&mut self, buf: &mut [u8]) -> Result<ReadOutcome> {
        Ok(self.content_mut()?.read_chunk(buf))
    }

    /// Rewinds the cursor so the content can be replayed. Never fails.
    pub fn close(&mut self) {
        if let Some(content) = self.content.as_mut() {
            content.reset();
        }
    }

    fn content_mut(&mut self) -> Result<&mut ContentSource> {
        self.content.as_mut().ok_or_else(|| Error::IsADirectory {
            path: self.info.name.clone(),
        })
    }
}

impl Read for VirtualFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_chunk(buf)?.bytes())
    }
}

impl Seek for VirtualFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.content_mut()?.seek(pos)
    }
}
