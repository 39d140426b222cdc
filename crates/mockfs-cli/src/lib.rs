//! mockfs CLI library.
//!
//! Exposes the argument definitions, command handlers and formatters of
//! the `mockfs` binary so they can be tested.

#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;
