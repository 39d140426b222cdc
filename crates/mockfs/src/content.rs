//! Piece-indexed content generation.
//!
//! A [`ContentSource`] produces the bytes of a virtual file on demand. The
//! byte at any offset depends only on the source parameters, never on how
//! the caller chunks its reads, and a random source never holds more than
//! one piece of generated data at a time.
//!
//! Three modes exist:
//!
//! - [`ZeroContent`]: all-zero bytes up to the declared size.
//! - [`RandomContent`]: pseudorandom bytes regenerated per piece from
//!   `(seed, piece_index)`.
//! - [`BufferContent`]: bytes copied verbatim from an owned buffer.
//!
//! # Examples
//!
//! ```
//! use mockfs::content::{Content, ContentSource, ReadOutcome};
//! use mockfs_core::{PieceSize, Seed};
//!
//! let mut source = ContentSource::random(10, Seed::new(42), PieceSize::new(4).unwrap());
//! let mut buf = [0u8; 16];
//!
//! assert_eq!(source.read_chunk(&mut buf), ReadOutcome::Data(10));
//! assert_eq!(source.read_chunk(&mut buf), ReadOutcome::EndOfStream);
//!
//! source.reset();
//! assert_eq!(source.position(), 0);
//! ```

use mockfs_core::{PieceSize, Seed};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};
use std::str::FromStr;
use tracing::trace;

/// Result of a single read against a content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// This many bytes were written to the front of the buffer.
    ///
    /// Zero only when the caller passed an empty buffer.
    Data(usize),
    /// The cursor is at or past the end; nothing was produced.
    EndOfStream,
}

impl ReadOutcome {
    /// Number of bytes produced (0 at end-of-stream).
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Data(n) => n,
            Self::EndOfStream => 0,
        }
    }

    /// Returns `true` if the read reported end-of-stream.
    #[must_use]
    pub const fn is_end_of_stream(self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}

/// Content mode tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// All-zero content.
    Zero,
    /// Seeded pseudorandom content.
    Random,
    /// Caller-supplied bytes.
    Buffer,
}

impl SourceKind {
    /// Returns the lowercase mode name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Random => "random",
            Self::Buffer => "buffer",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = mockfs_core::Error;

    /// Accepts the mode names and the device-style aliases
    /// `/dev/zero`, `/dev/random` and `buf`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zero" | "/dev/zero" => Ok(Self::Zero),
            "random" | "/dev/random" | "/dev/urandom" => Ok(Self::Random),
            "buffer" | "buf" => Ok(Self::Buffer),
            _ => Err(mockfs_core::Error::InvalidArgument(format!(
                "unknown content source: '{s}' (expected: zero, random, or buffer)"
            ))),
        }
    }
}

/// Cursor-driven byte producer.
///
/// Implementations are position-addressed: after [`set_position`] the next
/// read yields exactly the bytes that a sequential read would have produced
/// at that offset.
///
/// [`set_position`]: Content::set_position
pub trait Content: fmt::Debug + Send {
    /// Declared length in bytes.
    fn len(&self) -> u64;

    /// Current cursor offset. May exceed [`len`](Content::len) after a seek.
    fn position(&self) -> u64;

    /// Moves the cursor.
    fn set_position(&mut self, position: u64);

    /// Fills the front of `buf` from the cursor and advances it.
    ///
    /// Produces `min(buf.len(), len - position)` bytes, or
    /// [`ReadOutcome::EndOfStream`] when the cursor is at or past the end.
    fn read_chunk(&mut self, buf: &mut [u8]) -> ReadOutcome;

    /// Returns `true` if the declared length is zero.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes left before end-of-stream.
    fn remaining(&self) -> u64 {
        self.len().saturating_sub(self.position())
    }

    /// Resets the cursor to the start.
    fn reset(&mut self) {
        self.set_position(0);
    }
}

/// Number of bytes a read of `requested` may produce, or `None` at the end.
fn window(position: u64, len: u64, requested: usize) -> Option<usize> {
    if position >= len {
        return None;
    }
    let remaining = len - position;
    Some(usize::try_from(remaining).map_or(requested, |r| r.min(requested)))
}

/// Resolves a seek request against a cursor and a length.
fn resolve_seek(position: u64, len: u64, pos: SeekFrom) -> io::Result<u64> {
    let target = match pos {
        SeekFrom::Start(offset) => Some(offset),
        SeekFrom::End(delta) => len.checked_add_signed(delta),
        SeekFrom::Current(delta) => position.checked_add_signed(delta),
    };
    target.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "invalid seek to a negative or overflowing position",
        )
    })
}

/// All-zero content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZeroContent {
    len: u64,
    position: u64,
}

impl ZeroContent {
    /// Creates `len` bytes of zeros.
    #[must_use]
    pub const fn new(len: u64) -> Self {
        Self { len, position: 0 }
    }
}

impl Content for ZeroContent {
    fn len(&self) -> u64 {
        self.len
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn set_position(&mut self, position: u64) {
        self.position = position;
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> ReadOutcome {
        let Some(n) = window(self.position, self.len, buf.len()) else {
            return ReadOutcome::EndOfStream;
        };
        buf[..n].fill(0);
        self.position += n as u64;
        ReadOutcome::Data(n)
    }
}

/// Seeded pseudorandom content, regenerated one piece at a time.
///
/// Piece `i` is the first `piece_size` bytes drawn from a generator seeded
/// with `seed + i`. Every instance owns its generator and working buffer, so
/// distinct instances never interfere with each other.
///
/// The working buffer holds the most recently generated piece. A read that
/// stays within that piece copies from it; moving to another piece
/// regenerates it from scratch.
pub struct RandomContent {
    len: u64,
    position: u64,
    seed: Seed,
    piece_size: PieceSize,
    piece: Vec<u8>,
    resident: Option<u64>,
}

impl RandomContent {
    /// Creates `len` bytes of content keyed by `seed`.
    #[must_use]
    pub const fn new(len: u64, seed: Seed, piece_size: PieceSize) -> Self {
        Self {
            len,
            position: 0,
            seed,
            piece_size,
            piece: Vec::new(),
            resident: None,
        }
    }

    /// Seed keying this content.
    #[must_use]
    pub const fn seed(&self) -> Seed {
        self.seed
    }

    /// Regeneration unit length.
    #[must_use]
    pub const fn piece_size(&self) -> PieceSize {
        self.piece_size
    }

    /// Number of pieces covering the declared length.
    #[must_use]
    pub const fn piece_count(&self) -> u64 {
        self.len.div_ceil(self.piece_size.as_u64())
    }

    /// Makes piece `index` resident in the working buffer.
    fn load_piece(&mut self, index: u64) {
        if self.resident == Some(index) {
            return;
        }
        // Allocated on first use; a handle that is never read holds nothing.
        self.piece.resize(self.piece_size.get(), 0);
        let mut rng = StdRng::seed_from_u64(self.seed.piece_key(index));
        rng.fill_bytes(&mut self.piece);
        self.resident = Some(index);
        trace!(seed = %self.seed, piece = index, "regenerated piece");
    }
}

impl Content for RandomContent {
    fn len(&self) -> u64 {
        self.len
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn set_position(&mut self, position: u64) {
        self.position = position;
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> ReadOutcome {
        let Some(n) = window(self.position, self.len, buf.len()) else {
            return ReadOutcome::EndOfStream;
        };

        let piece_len = self.piece_size.as_u64();
        let mut filled = 0;
        while filled < n {
            let index = self.position / piece_len;
            // Always below piece_size, which fits in usize.
            #[allow(clippy::cast_possible_truncation)]
            let offset = (self.position % piece_len) as usize;
            self.load_piece(index);

            let take = (n - filled).min(self.piece_size.get() - offset);
            buf[filled..filled + take].copy_from_slice(&self.piece[offset..offset + take]);
            filled += take;
            self.position += take as u64;
        }
        ReadOutcome::Data(n)
    }
}

impl fmt::Debug for RandomContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomContent")
            .field("len", &self.len)
            .field("position", &self.position)
            .field("seed", &self.seed)
            .field("piece_size", &self.piece_size)
            .field("resident", &self.resident)
            .finish_non_exhaustive()
    }
}

impl Clone for RandomContent {
    /// Clones parameters and cursor; the working buffer is not copied.
    fn clone(&self) -> Self {
        Self {
            position: self.position,
            ..Self::new(self.len, self.seed, self.piece_size)
        }
    }
}

/// Content copied from an owned byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferContent {
    bytes: Vec<u8>,
    position: u64,
}

impl BufferContent {
    /// Wraps `bytes`; the declared length is `bytes.len()`.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            position: 0,
        }
    }

    /// The full buffer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Content for BufferContent {
    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn set_position(&mut self, position: u64) {
        self.position = position;
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> ReadOutcome {
        let Some(n) = window(self.position, self.len(), buf.len()) else {
            return ReadOutcome::EndOfStream;
        };
        // Below bytes.len() after the window check.
        #[allow(clippy::cast_possible_truncation)]
        let start = self.position as usize;
        buf[..n].copy_from_slice(&self.bytes[start..start + n]);
        self.position += n as u64;
        ReadOutcome::Data(n)
    }
}

/// Content source of a virtual file, one variant per mode.
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// All-zero content.
    Zero(ZeroContent),
    /// Seeded pseudorandom content.
    Random(RandomContent),
    /// Caller-supplied bytes.
    Buffer(BufferContent),
}

impl ContentSource {
    /// Zero-filled source of `len` bytes.
    #[must_use]
    pub const fn zero(len: u64) -> Self {
        Self::Zero(ZeroContent::new(len))
    }

    /// Pseudorandom source of `len` bytes.
    #[must_use]
    pub const fn random(len: u64, seed: Seed, piece_size: PieceSize) -> Self {
        Self::Random(RandomContent::new(len, seed, piece_size))
    }

    /// Source over `bytes`.
    #[must_use]
    pub fn buffer(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Buffer(BufferContent::new(bytes))
    }

    /// Mode of this source.
    #[must_use]
    pub const fn kind(&self) -> SourceKind {
        match self {
            Self::Zero(_) => SourceKind::Zero,
            Self::Random(_) => SourceKind::Random,
            Self::Buffer(_) => SourceKind::Buffer,
        }
    }

    /// Seed, for random sources.
    #[must_use]
    pub const fn seed(&self) -> Option<Seed> {
        match self {
            Self::Random(content) => Some(content.seed()),
            _ => None,
        }
    }

    /// Piece size, for random sources.
    #[must_use]
    pub const fn piece_size(&self) -> Option<PieceSize> {
        match self {
            Self::Random(content) => Some(content.piece_size()),
            _ => None,
        }
    }

    fn as_content(&self) -> &dyn Content {
        match self {
            Self::Zero(content) => content,
            Self::Random(content) => content,
            Self::Buffer(content) => content,
        }
    }

    fn as_content_mut(&mut self) -> &mut dyn Content {
        match self {
            Self::Zero(content) => content,
            Self::Random(content) => content,
            Self::Buffer(content) => content,
        }
    }
}

impl Content for ContentSource {
    fn len(&self) -> u64 {
        self.as_content().len()
    }

    fn position(&self) -> u64 {
        self.as_content().position()
    }

    fn set_position(&mut self, position: u64) {
        self.as_content_mut().set_position(position);
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> ReadOutcome {
        self.as_content_mut().read_chunk(buf)
    }
}

impl Read for ContentSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_chunk(buf).bytes())
    }
}

impl Seek for ContentSource {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = resolve_seek(self.position(), self.len(), pos)?;
        self.set_position(target);
        Ok(target)
    }
}
