//! Builder pattern for constructing virtual files.
//!
//! The plain constructors on [`VirtualFile`] cover the common cases. The
//! builder adds the knobs they leave out: a fixed modification time for
//! reproducible metadata, an explicit seed or seed deriver, and
//! configuration-driven defaults.
//!
//! # Examples
//!
//! ```
//! use mockfs::{SourceKind, VirtualFileBuilder};
//! use mockfs_core::{FileMode, PieceSize};
//!
//! let file = VirtualFileBuilder::new("/data/blob.bin")
//!     .source(SourceKind::Random)
//!     .size(4 * 1024 * 1024)
//!     .piece_size(PieceSize::new(64 * 1024).unwrap())
//!     .mode(FileMode::new(0o600))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(file.stat().size, 4 * 1024 * 1024);
//! ```

use crate::content::{ContentSource, SourceKind};
use crate::file::VirtualFile;
use crate::seed::{Md5PowerFold, SeedDeriver};
use chrono::{DateTime, Utc};
use mockfs_core::{Error, FileMode, GeneratorConfig, PieceSize, Result, Seed};
use tracing::debug;

/// Builder for a [`VirtualFile`].
///
/// Defaults: random content, size 0, 1 MiB pieces, mode `0o644`, seed
/// derived from the path, modification time taken at `build()`.
#[derive(Debug, Clone)]
pub struct VirtualFileBuilder {
    path: String,
    kind: SourceKind,
    size: u64,
    piece_size: PieceSize,
    mode: Option<FileMode>,
    mod_time: Option<DateTime<Utc>>,
    seed: Option<Seed>,
    bytes: Option<Vec<u8>>,
    directory: bool,
}

impl VirtualFileBuilder {
    /// Starts a builder for `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: SourceKind::Random,
            size: 0,
            piece_size: PieceSize::DEFAULT,
            mode: None,
            mod_time: None,
            seed: None,
            bytes: None,
            directory: false,
        }
    }

    /// Applies piece size and default mode from `config`.
    ///
    /// An explicit `.mode()` call takes precedence regardless of order.
    #[must_use]
    pub fn config(mut self, config: &GeneratorConfig) -> Self {
        self.piece_size = config.piece_size;
        self.mode = self.mode.or(Some(config.default_mode));
        self
    }

    /// Selects the content mode.
    #[must_use]
    pub const fn source(mut self, kind: SourceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Declared size for zero and random content. Ignored for buffers.
    #[must_use]
    pub const fn size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Piece size for random content.
    #[must_use]
    pub const fn piece_size(mut self, piece_size: PieceSize) -> Self {
        self.piece_size = piece_size;
        self
    }

    /// Permission bits.
    #[must_use]
    pub const fn mode(mut self, mode: FileMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Fixed modification time.
    #[must_use]
    pub const fn mod_time(mut self, mod_time: DateTime<Utc>) -> Self {
        self.mod_time = Some(mod_time);
        self
    }

    /// Uses `seed` instead of deriving one from the path.
    #[must_use]
    pub const fn seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Derives the seed from the path with `deriver`.
    #[must_use]
    pub fn seed_deriver(mut self, deriver: &impl SeedDeriver) -> Self {
        self.seed = Some(deriver.derive(&self.path));
        self
    }

    /// Uses `bytes` as content and switches to buffer mode.
    #[must_use]
    pub fn buffer(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.kind = SourceKind::Buffer;
        self.bytes = Some(bytes.into());
        self
    }

    /// Builds a directory handle instead of a file.
    #[must_use]
    pub const fn directory(mut self) -> Self {
        self.directory = true;
        self
    }

    /// Consumes the builder and returns the virtual file.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if buffer mode was selected without
    /// supplying bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockfs::{SourceKind, VirtualFileBuilder};
    ///
    /// let result = VirtualFileBuilder::new("/b").source(SourceKind::Buffer).build();
    /// assert!(result.is_err());
    ///
    /// let file = VirtualFileBuilder::new("/b").buffer(b"abc".to_vec()).size(99).build().unwrap();
    /// assert_eq!(file.stat().size, 3);
    /// ```
    pub fn build(self) -> Result<VirtualFile> {
        let mod_time = self.mod_time.unwrap_or_else(Utc::now);

        if self.directory {
            let mode = self.mode.unwrap_or(FileMode::DIR);
            return Ok(VirtualFile::assemble(self.path, mode, mod_time, None));
        }

        let source = match self.kind {
            SourceKind::Zero => ContentSource::zero(self.size),
            SourceKind::Random => {
                let seed = self
                    .seed
                    .unwrap_or_else(|| Md5PowerFold.derive(&self.path));
                debug!(path = %self.path, %seed, size = self.size, "building random file");
                ContentSource::random(self.size, seed, self.piece_size)
            }
            SourceKind::Buffer => {
                let bytes = self.bytes.ok_or_else(|| {
                    Error::InvalidArgument(format!(
                        "buffer content for '{}' needs explicit bytes",
                        self.path
                    ))
                })?;
                ContentSource::buffer(bytes)
            }
        };

        let mode = self.mode.unwrap_or_default();
        Ok(VirtualFile::assemble(self.path, mode, mod_time, Some(source)))
    }
}
