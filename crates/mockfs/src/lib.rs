//! Deterministic virtual files of arbitrary size.
//!
//! `mockfs` hands out read-only file handles whose content is computed on
//! demand instead of stored. A consumer can stream gigabytes through an
//! upload, copy or checksum pipeline and verify the result against a
//! digest that is a pure function of how the file was declared.
//!
//! # Content modes
//!
//! - **Zero**: every byte is `0x00`.
//! - **Random**: pseudorandom bytes keyed by a seed derived from the path,
//!   generated one fixed-size piece at a time so any offset can be served
//!   without producing the bytes before it.
//! - **Buffer**: a caller-supplied byte vector read back verbatim.
//!
//! # Architecture
//!
//! ```text
//! seed ──► content ──► file ──► digest
//!                        │
//!                        └────► range
//! ```
//!
//! # Examples
//!
//! ```
//! use mockfs::{digest, VirtualFile};
//! use mockfs_core::FileMode;
//!
//! let mut a = VirtualFile::random("/test_dir/a.txt", FileMode::ALL, 64 * 1024);
//! let mut b = VirtualFile::random("/test_dir/a.txt", FileMode::ALL, 64 * 1024);
//! assert_eq!(digest(&mut a).unwrap(), digest(&mut b).unwrap());
//!
//! let zeros = VirtualFile::zero("/zeros", FileMode::FILE, 1);
//! assert_eq!(digest(zeros).unwrap(), "93b885adfe0da089cdf634904fd59f71");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod builder;
pub mod content;
pub mod digest;
pub mod file;
pub mod range;
pub mod seed;

pub use builder::VirtualFileBuilder;
pub use content::{Content, ContentSource, ReadOutcome, SourceKind};
pub use digest::{DigestReport, EMPTY_MD5, digest, digest_with};
pub use file::{FileInfo, VirtualFile};
pub use range::{ByteRange, RangeReader};
pub use seed::{Md5PowerFold, SeedDeriver, derive_seed};
