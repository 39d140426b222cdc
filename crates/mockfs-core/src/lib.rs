//! Core types, configuration and errors for mockfs.
//!
//! This crate provides the foundational types shared by the content
//! engine (`mockfs`) and the command-line front end (`mockfs-cli`).
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong domain types (`ByteSize`, `PieceSize`, `Seed`, `FileMode`)
//! - Error hierarchy with contextual information
//! - Generator configuration loaded from TOML
//! - CLI value types (`OutputFormat`, `ExitCode`)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod cli;
mod config;
mod error;
mod types;

pub use config::{DigestAlgorithm, GeneratorConfig, GeneratorConfigBuilder};
pub use error::{Error, Result};
pub use types::{ByteSize, FileMode, PieceSize, Seed};
