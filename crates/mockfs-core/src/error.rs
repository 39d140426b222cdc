//! Error types for mockfs.
//!
//! Reaching the end of a virtual file is never an error; it is reported as a
//! normal end-of-stream outcome. The variants below cover contract violations
//! (bad construction parameters, reading a directory) and the propagation of
//! I/O failures from readers that wrap real sources.
//!
//! # Examples
//!
//! ```
//! use mockfs_core::{Error, PieceSize};
//!
//! let err = PieceSize::new(0).unwrap_err();
//! assert!(err.is_invalid_piece_size());
//! ```

use std::io;
use thiserror::Error;

/// Main error type for mockfs.
///
/// All errors in the workspace use this type, so callers draining virtual
/// files through generic readers see a single, classifiable error surface.
#[derive(Error, Debug)]
pub enum Error {
    /// Piece size is zero or does not fit in addressable memory.
    #[error("Invalid piece size: {size} (must be between 1 and usize::MAX)")]
    InvalidPieceSize {
        /// The rejected piece size in bytes
        size: u64,
    },

    /// A size string could not be parsed.
    #[error("Invalid size '{input}': {reason}")]
    InvalidSize {
        /// The text that failed to parse
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// Byte range has its start after its end.
    #[error("Invalid byte range: {start}-{end}")]
    InvalidRange {
        /// First byte of the range
        start: u64,
        /// Last byte of the range (inclusive)
        end: u64,
    },

    /// A read was attempted on a directory handle.
    ///
    /// Directory handles carry no content source; callers must check
    /// `is_directory` before reading.
    #[error("Is a directory: {path}")]
    IsADirectory {
        /// Name of the directory handle
        path: String,
    },

    /// Configuration is invalid or could not be loaded.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Invalid argument error.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Returns `true` if this is an invalid piece size error.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockfs_core::Error;
    ///
    /// let err = Error::InvalidPieceSize { size: 0 };
    /// assert!(err.is_invalid_piece_size());
    /// ```
    #[must_use]
    pub const fn is_invalid_piece_size(&self) -> bool {
        matches!(self, Self::InvalidPieceSize { .. })
    }

    /// Returns `true` if this is a directory read violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockfs_core::Error;
    ///
    /// let err = Error::IsADirectory {
    ///     path: "/data".to_string(),
    /// };
    /// assert!(err.is_directory_error());
    /// ```
    #[must_use]
    pub const fn is_directory_error(&self) -> bool {
        matches!(self, Self::IsADirectory { .. })
    }

    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockfs_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "bad piece size".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if the error came from an underlying reader or writer.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Returns `true` if caller-supplied input was rejected.
    ///
    /// Covers sizes, ranges and generic arguments.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidSize { .. }
                | Self::InvalidRange { .. }
                | Self::InvalidPieceSize { .. }
                | Self::InvalidArgument(_)
        )
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(inner) => inner,
            Error::IsADirectory { .. } => Self::new(io::ErrorKind::IsADirectory, err),
            other => Self::new(io::ErrorKind::InvalidInput, other),
        }
    }
}

/// Type alias for Result with mockfs Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidRange { start: 10, end: 2 };
        assert_eq!(err.to_string(), "Invalid byte range: 10-2");

        let err = Error::IsADirectory {
            path: "/dir".to_string(),
        };
        assert_eq!(err.to_string(), "Is a directory: /dir");
    }

    #[test]
    fn test_error_classification() {
        let err = Error::InvalidPieceSize { size: 0 };
        assert!(err.is_invalid_piece_size());
        assert!(err.is_invalid_input());
        assert!(!err.is_directory_error());

        let err = Error::Io(io::Error::other("boom"));
        assert!(err.is_io_error());
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_into_io_error_keeps_kind() {
        let io_err: io::Error = Error::IsADirectory {
            path: "/dir".to_string(),
        }
        .into();
        assert_eq!(io_err.kind(), io::ErrorKind::IsADirectory);

        let io_err: io::Error = Error::Io(io::Error::new(io::ErrorKind::BrokenPipe, "x")).into();
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);

        let io_err: io::Error = Error::InvalidRange { start: 5, end: 1 }.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_from_io_error() {
        let err: Error = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(err.is_io_error());
    }
}
