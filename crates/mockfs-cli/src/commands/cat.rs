//! Cat command implementation.
//!
//! Streams the bytes of a virtual file, or an inclusive window of it, to
//! stdout or an output file.

use super::common::open_file;
use crate::cli::ContentArgs;
use anyhow::{Context, Result};
use mockfs::{ByteRange, RangeReader};
use mockfs_core::GeneratorConfig;
use mockfs_core::cli::ExitCode;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

/// Copies the described file (or `range` of it) into `writer`.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns an error if the file description is invalid or a read or
/// write fails.
pub fn copy_to<W: Write>(
    path: &str,
    content: &ContentArgs,
    config: &GeneratorConfig,
    range: Option<ByteRange>,
    writer: &mut W,
) -> Result<u64> {
    let file = open_file(path, content, config)?;
    let mut reader: Box<dyn Read> = match range {
        Some(range) => Box::new(RangeReader::new(file, range)?),
        None => Box::new(file),
    };

    let mut buf = vec![0u8; config.read_buffer_len()];
    let mut written = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).with_context(|| format!("failed to read {path}")),
        };
        writer.write_all(&buf[..n]).context("failed to write output")?;
        written += n as u64;
    }
    writer.flush().context("failed to flush output")?;
    Ok(written)
}

/// Runs the cat command.
///
/// # Errors
///
/// Returns an error if the output file cannot be created or copying fails.
pub fn run(
    path: &str,
    content: &ContentArgs,
    config: &GeneratorConfig,
    range: Option<ByteRange>,
    output: Option<&Path>,
) -> Result<ExitCode> {
    let written = match output {
        Some(target) => {
            let out = File::create(target)
                .with_context(|| format!("failed to create {}", target.display()))?;
            copy_to(path, content, config, range, &mut BufWriter::new(out))?
        }
        None => copy_to(path, content, config, range, &mut io::stdout().lock())?,
    };

    info!("Wrote {written} bytes of {path}");
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockfs::{SourceKind, digest};
    use mockfs_core::ByteSize;

    fn args(source: SourceKind, size: u64) -> ContentArgs {
        ContentArgs {
            size: ByteSize::new(size),
            source,
            piece_size: Some(ByteSize::new(256)),
            mode: None,
            from: None,
        }
    }

    #[test]
    fn test_copy_full_file() {
        let mut out = Vec::new();
        let n = copy_to(
            "/c",
            &args(SourceKind::Random, 1000),
            &GeneratorConfig::default(),
            None,
            &mut out,
        )
        .unwrap();
        assert_eq!(n, 1000);
        assert_eq!(out.len(), 1000);
    }

    #[test]
    fn test_copy_range_matches_slice() {
        let config = GeneratorConfig::default();
        let content = args(SourceKind::Random, 1000);

        let mut whole = Vec::new();
        copy_to("/c", &content, &config, None, &mut whole).unwrap();

        let mut window = Vec::new();
        let range = ByteRange::new(250, 260).unwrap();
        copy_to("/c", &content, &config, Some(range), &mut window).unwrap();
        assert_eq!(window, &whole[250..=260]);
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("out.bin");

        let code = run(
            "/zeros",
            &args(SourceKind::Zero, 1),
            &GeneratorConfig::default(),
            None,
            Some(&target),
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let file = File::open(&target).unwrap();
        assert_eq!(digest(file).unwrap(), "93b885adfe0da089cdf634904fd59f71");
    }

    #[test]
    fn test_run_fails_for_missing_directory() {
        let result = run(
            "/zeros",
            &args(SourceKind::Zero, 1),
            &GeneratorConfig::default(),
            None,
            Some(Path::new("/definitely/not/a/dir/out.bin")),
        );
        assert!(result.is_err());
    }
}
