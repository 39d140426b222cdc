//! Common utilities shared across CLI commands.
//!
//! Turns [`ContentArgs`] plus the loaded [`GeneratorConfig`] into a
//! [`VirtualFile`].

use crate::cli::ContentArgs;
use anyhow::{Context, Result, bail};
use mockfs::{SourceKind, VirtualFile, VirtualFileBuilder};
use mockfs_core::{GeneratorConfig, PieceSize};
use tracing::debug;

/// Builds the virtual file described by `args` for `path`.
///
/// Command-line `--piece-size` and `--mode` take precedence over the
/// configuration.
///
/// # Errors
///
/// Returns an error if the piece size is invalid, if `--from` cannot be
/// read, or if buffer mode is requested without `--from`.
///
/// # Examples
///
/// ```
/// use clap::Parser;
/// use mockfs_cli::cli::{Cli, Commands};
/// use mockfs_cli::commands::common::open_file;
/// use mockfs_core::GeneratorConfig;
///
/// let cli = Cli::parse_from(["mockfs", "stat", "/z", "--source", "zero", "--size", "1KiB"]);
/// let Commands::Stat { path, content } = cli.command else { unreachable!() };
///
/// let file = open_file(&path, &content, &GeneratorConfig::default()).unwrap();
/// assert_eq!(file.stat().size, 1024);
/// ```
pub fn open_file(path: &str, args: &ContentArgs, config: &GeneratorConfig) -> Result<VirtualFile> {
    if args.from.is_some() && args.source != SourceKind::Buffer {
        bail!("--from is only valid with --source buffer");
    }

    let mut builder = VirtualFileBuilder::new(path)
        .config(config)
        .source(args.source)
        .size(args.size.as_u64());

    if let Some(piece_size) = args.piece_size {
        builder = builder.piece_size(PieceSize::new(piece_size.as_u64())?);
    }
    if let Some(mode) = args.mode {
        builder = builder.mode(mode);
    }

    if args.source == SourceKind::Buffer {
        let Some(from) = &args.from else {
            bail!("--source buffer needs --from <FILE>");
        };
        let bytes = std::fs::read(from)
            .with_context(|| format!("failed to read buffer content from {}", from.display()))?;
        debug!(path, from = %from.display(), len = bytes.len(), "loaded buffer content");
        builder = builder.buffer(bytes);
    }

    Ok(builder.build()?)
}
