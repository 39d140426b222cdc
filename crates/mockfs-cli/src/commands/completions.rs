//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, elvish and
//! `PowerShell`.

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use mockfs_core::cli::ExitCode;
use std::io::{self, Write};
use tracing::info;

/// Writes the completion script for `shell` to `out`.
///
/// # Examples
///
/// ```
/// use clap::CommandFactory;
/// use clap_complete::Shell;
/// use mockfs_cli::cli::Cli;
/// use mockfs_cli::commands::completions;
///
/// let mut script = Vec::new();
/// completions::write_completions(Shell::Bash, &mut Cli::command(), &mut script);
/// assert!(String::from_utf8(script).unwrap().contains("mockfs"));
/// ```
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
///
/// # Errors
///
/// This function does not currently fail; it returns `Result` to match the
/// other command handlers.
pub fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    info!("Generating {shell} completions");
    write_completions(shell, cmd, &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}
