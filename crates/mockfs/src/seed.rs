//! Seed derivation from file paths.
//!
//! A random virtual file is keyed by a seed derived from its path, so two
//! handles built for the same path produce the same bytes. The default
//! derivation hashes the path with MD5 and folds the digest by summing
//! `2^byte` for every digest byte in a wrapping 64-bit accumulator.
//!
//! The fold is lossy (any byte value of 64 or more contributes nothing) and
//! different paths can collide. It is kept for compatibility with content
//! recorded by earlier tooling; swap in another [`SeedDeriver`] for a
//! stronger mix.
//!
//! # Examples
//!
//! ```
//! use mockfs::seed::{derive_seed, Md5PowerFold, SeedDeriver};
//!
//! let seed = derive_seed("file1");
//! assert_eq!(seed, Md5PowerFold.derive("file1"));
//! assert_eq!(seed.get(), 4096);
//! ```

use mockfs_core::Seed;

/// Maps an identifying string to a deterministic seed.
pub trait SeedDeriver {
    /// Derives the seed for `path`. Must be a pure function of `path`.
    fn derive(&self, path: &str) -> Seed;
}

/// MD5 digest folded by power-of-two accumulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Md5PowerFold;

impl SeedDeriver for Md5PowerFold {
    fn derive(&self, path: &str) -> Seed {
        let digest = md5::compute(path.as_bytes());
        let folded = digest.0.iter().fold(0_i64, |acc, &byte| {
            // 2^byte wraps to 0 for byte >= 64
            acc.wrapping_add(1_i64.checked_shl(u32::from(byte)).unwrap_or(0))
        });
        Seed::new(folded)
    }
}

/// Derives the seed for `path` with the default [`Md5PowerFold`].
#[must_use]
pub fn derive_seed(path: &str) -> Seed {
    Md5PowerFold.derive(path)
}
