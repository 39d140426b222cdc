//! Streaming content digests.
//!
//! Drains any [`Read`] in fixed-size chunks into a streaming hash and
//! returns lowercase hex. MD5 is the default so digests stay comparable
//! with values recorded by earlier tooling; BLAKE3 is available through
//! [`digest_with`] and reports as `"blake3:<hex>"`.
//!
//! # Examples
//!
//! ```
//! use mockfs::digest::{digest, EMPTY_MD5};
//!
//! assert_eq!(digest(&b""[..]).unwrap(), EMPTY_MD5);
//! assert_eq!(digest(&b"hello world"[..]).unwrap(), "5eb63bbbe01eeed093cb22bb8f5acdc3");
//! ```

use mockfs_core::{DigestAlgorithm, Error, Result};
use serde::Serialize;
use std::fmt;
use std::io::{self, Read};
use tracing::debug;

/// Chunk length used by [`digest`].
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// MD5 of empty input.
pub const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

/// Result of draining a reader through [`digest_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestReport {
    /// Algorithm that produced `hex`.
    pub algorithm: DigestAlgorithm,
    /// Lowercase hex digest.
    pub hex: String,
    /// Number of bytes consumed.
    pub bytes: u64,
}

impl DigestReport {
    /// Checks `expected` against this digest.
    ///
    /// Accepts either bare hex or the `"<algo>:<hex>"` form, ignoring case.
    /// A prefix naming a different algorithm never matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockfs::digest::{digest_with, DEFAULT_BUFFER_SIZE};
    /// use mockfs_core::DigestAlgorithm;
    ///
    /// let report = digest_with(&b""[..], DigestAlgorithm::Md5, DEFAULT_BUFFER_SIZE).unwrap();
    /// assert!(report.matches("D41D8CD98F00B204E9800998ECF8427E"));
    /// assert!(report.matches("md5:d41d8cd98f00b204e9800998ecf8427e"));
    /// assert!(!report.matches("blake3:d41d8cd98f00b204e9800998ecf8427e"));
    /// ```
    #[must_use]
    pub fn matches(&self, expected: &str) -> bool {
        let expected = expected.trim();
        let hex = match expected.split_once(':') {
            Some((algo, hex)) if algo.eq_ignore_ascii_case(self.algorithm.as_str()) => hex,
            Some(_) => return false,
            None => expected,
        };
        hex.eq_ignore_ascii_case(&self.hex)
    }
}

impl fmt::Display for DigestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.hex)
    }
}

enum Hasher {
    Md5(md5::Context),
    Blake3(Box<blake3::Hasher>),
}

impl Hasher {
    fn new(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Md5 => Self::Md5(md5::Context::new()),
            DigestAlgorithm::Blake3 => Self::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(ctx) => ctx.consume(data),
            Self::Blake3(hasher) => {
                hasher.update(data);
            }
        }
    }

    fn finish(self) -> String {
        match self {
            Self::Md5(ctx) => format!("{:x}", ctx.compute()),
            Self::Blake3(hasher) => hasher.finalize().to_hex().to_string(),
        }
    }
}

/// Returns the lowercase hex MD5 of everything `reader` yields.
///
/// # Errors
///
/// Propagates any read error other than `Interrupted` as `Error::Io`.
pub fn digest<R: Read>(reader: R) -> Result<String> {
    digest_with(reader, DigestAlgorithm::Md5, DEFAULT_BUFFER_SIZE).map(|report| report.hex)
}

/// Drains `reader` in `buffer_size` chunks through `algorithm`.
///
/// # Errors
///
/// Returns `Error::InvalidArgument` for a zero `buffer_size`, and
/// propagates any read error other than `Interrupted` as `Error::Io`.
///
/// # Examples
///
/// ```
/// use mockfs::digest::digest_with;
/// use mockfs_core::DigestAlgorithm;
///
/// let report = digest_with(&[0u8; 1][..], DigestAlgorithm::Md5, 7).unwrap();
/// assert_eq!(report.bytes, 1);
/// assert_eq!(report.to_string(), "md5:93b885adfe0da089cdf634904fd59f71");
/// ```
pub fn digest_with<R: Read>(
    mut reader: R,
    algorithm: DigestAlgorithm,
    buffer_size: usize,
) -> Result<DigestReport> {
    if buffer_size == 0 {
        return Err(Error::InvalidArgument(
            "digest buffer size must be non-zero".to_string(),
        ));
    }

    let mut hasher = Hasher::new(algorithm);
    let mut buf = vec![0u8; buffer_size];
    let mut total: u64 = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::Io(e)),
        };
        hasher.update(&buf[..n]);
        total += n as u64;
    }

    let hex = hasher.finish();
    debug!(algorithm = %algorithm, bytes = total, digest = %hex, "digest complete");

    Ok(DigestReport {
        algorithm,
        hex,
        bytes: total,
    })
}
