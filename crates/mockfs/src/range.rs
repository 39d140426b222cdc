//! Inclusive byte-range windows over seekable sources.
//!
//! [`RangeReader`] serves bytes `start..=end` of an inner reader, the shape
//! partial-content responses need. Headers and status codes stay with the
//! caller.
//!
//! # Examples
//!
//! ```
//! use mockfs::range::{ByteRange, RangeReader};
//! use mockfs::VirtualFile;
//! use mockfs_core::FileMode;
//! use std::io::Read;
//!
//! let file = VirtualFile::from_buffer("/abc", FileMode::FILE, b"0123456789".to_vec());
//! let range: ByteRange = "2-5".parse().unwrap();
//!
//! let mut window = RangeReader::new(file, range).unwrap();
//! let mut out = String::new();
//! window.read_to_string(&mut out).unwrap();
//! assert_eq!(out, "2345");
//! ```

use mockfs_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};
use std::str::FromStr;

/// Inclusive byte range `start..=end`.
///
/// `end` is `None` for an open-ended `"start-"` range that runs to the end
/// of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteRange {
    start: u64,
    end: Option<u64>,
}

impl ByteRange {
    /// Closed range `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRange` if `start > end`.
    pub const fn new(start: u64, end: u64) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self {
            start,
            end: Some(end),
        })
    }

    /// Range from `start` to the end of the source.
    #[inline]
    #[must_use]
    pub const fn from_start(start: u64) -> Self {
        Self { start, end: None }
    }

    /// First byte offset.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Last byte offset, if closed.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> Option<u64> {
        self.end
    }

    /// Resolves the range against a source of `size` bytes.
    ///
    /// The end is clamped to `size - 1`. Returns `None` when the range
    /// starts at or past `size`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockfs::range::ByteRange;
    ///
    /// let range = ByteRange::new(5, 100).unwrap();
    /// assert_eq!(range.clamp_to(10), Some((5, 9)));
    /// assert_eq!(range.clamp_to(5), None);
    /// ```
    #[must_use]
    pub fn clamp_to(&self, size: u64) -> Option<(u64, u64)> {
        if self.start >= size {
            return None;
        }
        let last = size - 1;
        let end = self.end.map_or(last, |end| end.min(last));
        Some((self.start, end))
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}-{end}", self.start),
            None => write!(f, "{}-", self.start),
        }
    }
}

impl FromStr for ByteRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidSize {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (start, end) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| invalid("expected 'start-end' or 'start-'"))?;

        let start = start
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid("range start is not a number"))?;

        let end = end.trim();
        if end.is_empty() {
            return Ok(Self::from_start(start));
        }
        let end = end
            .parse::<u64>()
            .map_err(|_| invalid("range end is not a number"))?;

        Self::new(start, end)
    }
}

/// Reader limited to one [`ByteRange`] of a seekable source.
#[derive(Debug)]
pub struct RangeReader<R> {
    inner: R,
    remaining: u64,
}

impl<R: Read + Seek> RangeReader<R> {
    /// Seeks `inner` to the start of `range` and limits reads to it.
    ///
    /// The window is clamped to the source length; a range starting past
    /// the end yields nothing.
    ///
    /// # Errors
    ///
    /// Propagates seek failures as `Error::Io`.
    pub fn new(mut inner: R, range: ByteRange) -> Result<Self> {
        let size = inner.seek(SeekFrom::End(0))?;
        let remaining = match range.clamp_to(size) {
            Some((start, end)) => {
                inner.seek(SeekFrom::Start(start))?;
                end - start + 1
            }
            None => 0,
        };
        Ok(Self { inner, remaining })
    }
}

impl<R> RangeReader<R> {
    /// Bytes left in the window.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Returns the inner source, positioned wherever reading stopped.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for RangeReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let want = usize::try_from(self.remaining).map_or(buf.len(), |r| r.min(buf.len()));
        let n = self.inner.read(&mut buf[..want])?;
        self.remaining -= n as u64;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::{digest, EMPTY_MD5};
    use crate::file::VirtualFile;
    use mockfs_core::{FileMode, PieceSize};
    use std::io::Cursor;

    #[test]
    fn test_parse_closed_and_open() {
        assert_eq!("0-99".parse::<ByteRange>().unwrap(), ByteRange::new(0, 99).unwrap());
        assert_eq!(" 10 - 20 ".parse::<ByteRange>().unwrap().end(), Some(20));
        assert_eq!("42-".parse::<ByteRange>().unwrap(), ByteRange::from_start(42));
        assert_eq!(ByteRange::from_start(42).to_string(), "42-");
        assert_eq!(ByteRange::new(1, 2).unwrap().to_string(), "1-2");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<ByteRange>().is_err());
        assert!("12".parse::<ByteRange>().is_err());
        assert!("-5".parse::<ByteRange>().is_err());
        assert!("a-b".parse::<ByteRange>().is_err());

        let err = "9-3".parse::<ByteRange>().unwrap_err();
        assert!(matches!(err, Error::InvalidRange { start: 9, end: 3 }));
    }

    #[test]
    fn test_single_byte_range() {
        let range = ByteRange::new(4, 4).unwrap();
        assert_eq!(range.clamp_to(10), Some((4, 4)));

        let mut reader = RangeReader::new(Cursor::new(b"abcdefgh".to_vec()), range).unwrap();
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"e");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_window_matches_slice_of_random_file() {
        let piece = PieceSize::new(100).unwrap();
        let mut whole = Vec::new();
        VirtualFile::random_with_piece_size("/range", FileMode::FILE, 1000, piece)
            .read_to_end(&mut whole)
            .unwrap();

        let file = VirtualFile::random_with_piece_size("/range", FileMode::FILE, 1000, piece);
        let mut reader = RangeReader::new(file, ByteRange::new(95, 305).unwrap()).unwrap();
        assert_eq!(reader.remaining(), 211);

        let mut window = Vec::new();
        reader.read_to_end(&mut window).unwrap();
        assert_eq!(window, &whole[95..=305]);
    }

    #[test]
    fn test_window_clamped_to_size() {
        let file = VirtualFile::zero("/z", FileMode::FILE, 10);
        let reader = RangeReader::new(file, ByteRange::from_start(7)).unwrap();
        assert_eq!(reader.remaining(), 3);

        let file = VirtualFile::zero("/z", FileMode::FILE, 10);
        let reader = RangeReader::new(file, ByteRange::new(10, 20).unwrap()).unwrap();
        assert_eq!(digest(reader).unwrap(), EMPTY_MD5);
    }

    #[test]
    fn test_into_inner_keeps_position() {
        let file = VirtualFile::zero("/p", FileMode::FILE, 50);
        let mut reader = RangeReader::new(file, ByteRange::new(10, 19).unwrap()).unwrap();
        io::copy(&mut reader, &mut io::sink()).unwrap();
        assert_eq!(reader.into_inner().position(), 20);
    }
}
