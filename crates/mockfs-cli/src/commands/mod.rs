//! Command implementations for the mockfs CLI.
//!
//! Each command module builds its virtual files from the shared
//! [`ContentArgs`](crate::cli::ContentArgs), runs the operation and formats
//! output according to the requested format.

pub mod cat;
pub mod common;
pub mod completions;
pub mod digest;
pub mod stat;
