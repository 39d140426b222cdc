//! Strong domain types for mockfs.
//!
//! Sizes, piece sizes, seeds and permission bits are all plain integers
//! underneath; the newtypes keep them from being mixed up and validate at
//! construction so the content engine never sees a zero piece size.
//!
//! # Examples
//!
//! ```
//! use mockfs_core::{ByteSize, FileMode, PieceSize, Seed};
//!
//! let size: ByteSize = "16MiB".parse().unwrap();
//! assert_eq!(size.as_u64(), 16 * 1024 * 1024);
//!
//! let piece = PieceSize::default();
//! assert_eq!(piece.get(), 1024 * 1024);
//!
//! let mode: FileMode = "755".parse().unwrap();
//! assert_eq!(mode.to_string(), "rwxr-xr-x");
//!
//! assert_eq!(Seed::new(-1).piece_key(1), 0);
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Accepts either a bare integer or a string in config files.
#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrText {
    Int(u64),
    Text(String),
}

/// A byte count, parsed from plain integers or binary-unit strings.
///
/// Units are powers of 1024: `K`/`KB`/`KiB`, `M`/`MB`/`MiB`,
/// `G`/`GB`/`GiB`, `T`/`TB`/`TiB`. Unit matching is case-insensitive.
///
/// # Examples
///
/// ```
/// use mockfs_core::ByteSize;
///
/// assert_eq!("1024".parse::<ByteSize>().unwrap().as_u64(), 1024);
/// assert_eq!("4k".parse::<ByteSize>().unwrap().as_u64(), 4096);
/// assert_eq!("2 GiB".parse::<ByteSize>().unwrap().as_u64(), 2 * ByteSize::GIB);
/// assert!("12 parsecs".parse::<ByteSize>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "IntOrText", into = "u64")]
pub struct ByteSize(u64);

impl ByteSize {
    /// One kibibyte.
    pub const KIB: u64 = 1024;
    /// One mebibyte.
    pub const MIB: u64 = 1024 * 1024;
    /// One gibibyte.
    pub const GIB: u64 = 1024 * 1024 * 1024;

    /// Creates a byte size from a raw count.
    #[inline]
    #[must_use]
    pub const fn new(bytes: u64) -> Self {
        Self(bytes)
    }

    /// Creates a byte size from mebibytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockfs_core::ByteSize;
    ///
    /// assert_eq!(ByteSize::from_mib(16).as_u64(), 16_777_216);
    /// ```
    #[inline]
    #[must_use]
    pub const fn from_mib(mib: u64) -> Self {
        Self(mib * Self::MIB)
    }

    /// Returns the byte count.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl FromStr for ByteSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidSize {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (digits, unit) = trimmed.split_at(split);
        if digits.is_empty() {
            return Err(invalid("expected a number"));
        }

        let value: u64 = digits.parse().map_err(|_| invalid("number out of range"))?;
        let multiplier = match unit.trim().to_ascii_lowercase().as_str() {
            "" | "b" => 1,
            "k" | "kb" | "kib" => Self::KIB,
            "m" | "mb" | "mib" => Self::MIB,
            "g" | "gb" | "gib" => Self::GIB,
            "t" | "tb" | "tib" => Self::GIB * 1024,
            _ => return Err(invalid("unknown unit")),
        };

        value
            .checked_mul(multiplier)
            .map(Self)
            .ok_or_else(|| invalid("size overflows 64 bits"))
    }
}

impl TryFrom<IntOrText> for ByteSize {
    type Error = Error;

    fn try_from(value: IntOrText) -> Result<Self> {
        match value {
            IntOrText::Int(bytes) => Ok(Self(bytes)),
            IntOrText::Text(text) => text.parse(),
        }
    }
}

impl From<ByteSize> for u64 {
    fn from(size: ByteSize) -> Self {
        size.0
    }
}

impl From<u64> for ByteSize {
    fn from(bytes: u64) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0;
        if bytes >= Self::GIB && bytes % Self::GIB == 0 {
            write!(f, "{}GiB", bytes / Self::GIB)
        } else if bytes >= Self::MIB && bytes % Self::MIB == 0 {
            write!(f, "{}MiB", bytes / Self::MIB)
        } else if bytes >= Self::KIB && bytes % Self::KIB == 0 {
            write!(f, "{}KiB", bytes / Self::KIB)
        } else {
            write!(f, "{bytes}B")
        }
    }
}

/// Length of one regeneration unit of a random virtual file.
///
/// Always non-zero and addressable as `usize`, so a working buffer of one
/// piece can be allocated.
///
/// # Examples
///
/// ```
/// use mockfs_core::PieceSize;
///
/// let piece = PieceSize::new(4096).unwrap();
/// assert_eq!(piece.get(), 4096);
///
/// assert!(PieceSize::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ByteSize", into = "ByteSize")]
pub struct PieceSize(usize);

impl PieceSize {
    /// Default piece size: 1 MiB.
    pub const DEFAULT: Self = Self(1024 * 1024);

    /// Creates a validated piece size.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPieceSize` if `bytes` is zero or exceeds
    /// `usize::MAX`.
    pub fn new(bytes: u64) -> Result<Self> {
        match usize::try_from(bytes) {
            Ok(size) if size > 0 => Ok(Self(size)),
            _ => Err(Error::InvalidPieceSize { size: bytes }),
        }
    }

    /// Returns the piece size in bytes.
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns the piece size as a 64-bit offset quantity.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0 as u64
    }
}

impl Default for PieceSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<ByteSize> for PieceSize {
    type Error = Error;

    fn try_from(size: ByteSize) -> Result<Self> {
        Self::new(size.as_u64())
    }
}

impl From<PieceSize> for ByteSize {
    fn from(piece: PieceSize) -> Self {
        Self(piece.as_u64())
    }
}

impl fmt::Display for PieceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ByteSize::from(*self).fmt(f)
    }
}

/// Seed keying deterministic content generation for one virtual file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(i64);

impl Seed {
    /// Creates a seed from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns the generator key for piece `piece_index`.
    ///
    /// The key is `seed + piece_index` with two's-complement wraparound,
    /// reinterpreted as unsigned.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    pub const fn piece_key(self, piece_index: u64) -> u64 {
        self.0.wrapping_add(piece_index as i64) as u64
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Unix-style permission bits of a virtual file.
///
/// Parsed from octal text (`"644"`, `"0o755"`); displayed symbolically.
///
/// # Examples
///
/// ```
/// use mockfs_core::FileMode;
///
/// assert_eq!(FileMode::ALL.to_string(), "rwxrwxrwx");
/// assert_eq!("0o640".parse::<FileMode>().unwrap().bits(), 0o640);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IntOrText", into = "u32")]
pub struct FileMode(u32);

impl FileMode {
    /// Permission mask (`0o777`).
    pub const PERM_MASK: u32 = 0o777;
    /// Every permission bit set.
    pub const ALL: Self = Self(0o777);
    /// Default mode for regular files.
    pub const FILE: Self = Self(0o644);
    /// Default mode for directories.
    pub const DIR: Self = Self(0o755);

    /// Creates a mode from raw bits, keeping only the permission bits.
    #[inline]
    #[must_use]
    pub const fn new(bits: u32) -> Self {
        Self(bits & Self::PERM_MASK)
    }

    /// Returns the permission bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl Default for FileMode {
    fn default() -> Self {
        Self::FILE
    }
}

impl FromStr for FileMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.trim();
        let digits = digits.strip_prefix("0o").unwrap_or(digits);
        let bits = u32::from_str_radix(digits, 8)
            .map_err(|_| Error::InvalidArgument(format!("invalid octal mode: '{s}'")))?;
        if bits > Self::PERM_MASK {
            return Err(Error::InvalidArgument(format!(
                "mode out of range: '{s}' (expected at most 777)"
            )));
        }
        Ok(Self(bits))
    }
}

impl TryFrom<IntOrText> for FileMode {
    type Error = Error;

    fn try_from(value: IntOrText) -> Result<Self> {
        match value {
            IntOrText::Int(bits) => u32::try_from(bits)
                .ok()
                .filter(|b| *b <= Self::PERM_MASK)
                .map(Self)
                .ok_or_else(|| Error::InvalidArgument(format!("mode out of range: {bits}"))),
            IntOrText::Text(text) => text.parse(),
        }
    }
}

impl From<FileMode> for u32 {
    fn from(mode: FileMode) -> Self {
        mode.0
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SYMBOLS: [char; 3] = ['r', 'w', 'x'];
        for shift in (0..9).rev() {
            let symbol = if self.0 & (1 << shift) == 0 {
                '-'
            } else {
                SYMBOLS[2 - shift % 3]
            };
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}
