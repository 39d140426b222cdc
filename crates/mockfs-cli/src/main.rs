//! mockfs command-line interface.
//!
//! Inspects, digests and streams deterministic virtual files.
//!
//! # Examples
//!
//! ```bash
//! # Metadata of a 16 MiB random file
//! mockfs stat /test_dir/a.txt --size 16MiB
//!
//! # Digest two files concurrently
//! mockfs digest file1 file3 --size 1MiB --format json
//!
//! # Write a byte window to disk
//! mockfs cat /test_dir/a.txt --size 4MiB --range 0-1023 --output head.bin
//! ```

use anyhow::Result;
use clap::Parser;
use mockfs_cli::cli::Cli;
use mockfs_cli::runner::{execute_command, init_logging, load_config};
use mockfs_core::cli::OutputFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let config = load_config(cli.config.as_deref())?;

    let exit_code = execute_command(cli.command, output_format, config).await?;

    std::process::exit(exit_code.as_i32());
}
