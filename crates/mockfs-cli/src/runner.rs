//! Command execution and runtime logic.
//!
//! Contains logging initialization, configuration discovery and the
//! command dispatch.

use anyhow::{Context, Result};
use clap::CommandFactory;
use mockfs_core::GeneratorConfig;
use mockfs_core::cli::{ExitCode, OutputFormat};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::commands;

/// Initializes logging infrastructure.
///
/// Sets up tracing with appropriate log levels based on verbosity flag.
/// Logs go to stderr so `cat` output on stdout stays clean.
///
/// # Errors
///
/// Returns an error if logging initialization fails.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("failed to initialize logging")?;

    Ok(())
}

/// Default configuration location: `<config dir>/mockfs/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mockfs").join("config.toml"))
}

/// Loads the generator configuration.
///
/// An explicit path must exist. Without one, the default location is used
/// when present and built-in defaults otherwise.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read or is invalid.
pub fn load_config(explicit: Option<&Path>) -> Result<GeneratorConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.is_file() => path,
            _ => {
                debug!("Using default generator configuration");
                return Ok(GeneratorConfig::default());
            }
        },
    };

    debug!("Loading configuration from {}", path.display());
    GeneratorConfig::load(&path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

/// Executes the specified CLI command.
///
/// Routes commands to their respective handlers and returns an exit code.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub async fn execute_command(
    command: Commands,
    output_format: OutputFormat,
    config: GeneratorConfig,
) -> Result<ExitCode> {
    match command {
        Commands::Stat { path, content } => {
            commands::stat::run(&path, &content, &config, output_format)
        }
        Commands::Digest {
            paths,
            content,
            algorithm,
            expect,
        } => commands::digest::run(paths, content, algorithm, expect, config, output_format).await,
        Commands::Cat {
            path,
            content,
            range,
            output,
        } => commands::cat::run(&path, &content, &config, range, output.as_deref()),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}
