//! Configuration for virtual file generation.
//!
//! `GeneratorConfig` collects the knobs that stay fixed for the lifetime of
//! a virtual file (piece size, default permission bits) together with the
//! settings used when draining one (read buffer size, digest algorithm).
//!
//! # Examples
//!
//! ```
//! use mockfs_core::{ByteSize, DigestAlgorithm, GeneratorConfig, PieceSize};
//!
//! // Use default configuration
//! let config = GeneratorConfig::default();
//! assert_eq!(config.piece_size, PieceSize::DEFAULT);
//! assert_eq!(config.digest_algorithm, DigestAlgorithm::Md5);
//!
//! // Load from TOML; unspecified fields keep their defaults
//! let config = GeneratorConfig::from_toml_str(r#"
//!     piece_size = "64KiB"
//!     digest_algorithm = "blake3"
//! "#).unwrap();
//! assert_eq!(config.piece_size.get(), 64 * 1024);
//! assert_eq!(config.read_buffer_size, ByteSize::new(64 * 1024));
//! ```

use crate::error::{Error, Result};
use crate::types::{ByteSize, FileMode, PieceSize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Digest algorithm used to fingerprint virtual file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// MD5, 32 hex characters. Matches digests recorded by older tooling.
    #[default]
    Md5,
    /// BLAKE3, 64 hex characters.
    Blake3,
}

impl DigestAlgorithm {
    /// Returns the lowercase algorithm name.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockfs_core::DigestAlgorithm;
    ///
    /// assert_eq!(DigestAlgorithm::Md5.as_str(), "md5");
    /// assert_eq!(DigestAlgorithm::Blake3.as_str(), "blake3");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Blake3 => "blake3",
        }
    }

    /// Length of the hex-encoded digest.
    #[must_use]
    pub const fn hex_len(&self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Blake3 => 64,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "blake3" => Ok(Self::Blake3),
            _ => Err(Error::InvalidArgument(format!(
                "invalid digest algorithm: '{s}' (expected: md5 or blake3)"
            ))),
        }
    }
}

/// Generation and verification settings.
///
/// # Examples
///
/// ```
/// use mockfs_core::{GeneratorConfig, PieceSize};
///
/// let config = GeneratorConfig {
///     piece_size: PieceSize::new(4096).unwrap(),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Length of one regeneration unit for random content.
    ///
    /// Default: 1 MiB
    pub piece_size: PieceSize,

    /// Buffer length used when draining a file for digests or copies.
    ///
    /// Default: 64 KiB
    pub read_buffer_size: ByteSize,

    /// Permission bits for files created without an explicit mode.
    ///
    /// Default: `0o644`
    pub default_mode: FileMode,

    /// Digest algorithm for content fingerprints.
    ///
    /// Default: MD5
    pub digest_algorithm: DigestAlgorithm,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            piece_size: PieceSize::DEFAULT,
            read_buffer_size: ByteSize::new(64 * ByteSize::KIB),
            default_mode: FileMode::FILE,
            digest_algorithm: DigestAlgorithm::Md5,
        }
    }
}

impl GeneratorConfig {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockfs_core::{DigestAlgorithm, GeneratorConfig};
    ///
    /// let config = GeneratorConfig::builder()
    ///     .digest_algorithm(DigestAlgorithm::Blake3)
    ///     .build();
    ///
    /// assert_eq!(config.digest_algorithm, DigestAlgorithm::Blake3);
    /// ```
    #[must_use]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }

    /// Parses a configuration from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the text is not valid TOML, contains
    /// unknown keys, or fails validation.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::ConfigError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::ConfigError {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded generator config");
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::ConfigError {
            message: e.to_string(),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the read buffer size is zero or does
    /// not fit in memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockfs_core::{ByteSize, GeneratorConfig};
    ///
    /// let mut config = GeneratorConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.read_buffer_size = ByteSize::new(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        match usize::try_from(self.read_buffer_size.as_u64()) {
            Ok(size) if size > 0 => Ok(()),
            _ => Err(Error::ConfigError {
                message: format!(
                    "read buffer size must be between 1 byte and usize::MAX, got {}",
                    self.read_buffer_size
                ),
            }),
        }
    }

    /// Read buffer size as `usize`, clamped to at least one byte.
    #[must_use]
    pub fn read_buffer_len(&self) -> usize {
        usize::try_from(self.read_buffer_size.as_u64())
            .unwrap_or(usize::MAX)
            .max(1)
    }
}

/// Builder for [`GeneratorConfig`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Creates a builder starting from the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the piece size.
    #[must_use]
    pub const fn piece_size(mut self, piece_size: PieceSize) -> Self {
        self.config.piece_size = piece_size;
        self
    }

    /// Sets the read buffer size.
    #[must_use]
    pub const fn read_buffer_size(mut self, size: ByteSize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    /// Sets the default permission bits.
    #[must_use]
    pub const fn default_mode(mut self, mode: FileMode) -> Self {
        self.config.default_mode = mode;
        self
    }

    /// Sets the digest algorithm.
    #[must_use]
    pub const fn digest_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.config.digest_algorithm = algorithm;
        self
    }

    /// Returns the configured value.
    #[must_use]
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}
