//! Digest command implementation.
//!
//! Drains each requested virtual file through the configured digest and
//! reports one entry per path. Files are independent, so every path runs
//! on its own blocking task.

use super::common::open_file;
use crate::cli::ContentArgs;
use crate::formatters::format_output;
use anyhow::{Context, Result};
use mockfs::digest_with;
use mockfs_core::cli::{ExitCode, OutputFormat};
use mockfs_core::{DigestAlgorithm, GeneratorConfig};
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Digest of one virtual file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DigestEntry {
    /// Virtual path
    pub path: String,
    /// Algorithm used
    pub algorithm: DigestAlgorithm,
    /// Lowercase hex digest
    pub digest: String,
    /// Bytes consumed
    pub bytes: u64,
    /// Whether the digest matched `--expect`, when given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<bool>,
}

/// Digests a single path synchronously.
///
/// # Errors
///
/// Returns an error if the file description is invalid or reading fails.
pub fn digest_path(
    path: &str,
    content: &ContentArgs,
    config: &GeneratorConfig,
    algorithm: DigestAlgorithm,
    expect: Option<&str>,
) -> Result<DigestEntry> {
    let file = open_file(path, content, config)?;
    let report = digest_with(file, algorithm, config.read_buffer_len())
        .with_context(|| format!("failed to digest {path}"))?;

    Ok(DigestEntry {
        path: path.to_string(),
        algorithm,
        matches: expect.map(|expected| report.matches(expected)),
        digest: report.hex,
        bytes: report.bytes,
    })
}

/// Runs the digest command.
///
/// Entries are reported in the order the paths were given.
///
/// # Errors
///
/// Returns an error if any path fails to digest or output formatting fails.
pub async fn run(
    paths: Vec<String>,
    content: ContentArgs,
    algorithm: Option<DigestAlgorithm>,
    expect: Option<String>,
    config: GeneratorConfig,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let algorithm = algorithm.unwrap_or(config.digest_algorithm);
    info!("Digesting {} path(s) with {algorithm}", paths.len());

    let shared = Arc::new((content, config, expect));
    let mut tasks = JoinSet::new();

    for (index, path) in paths.into_iter().enumerate() {
        let shared = Arc::clone(&shared);
        tasks.spawn_blocking(move || {
            let (content, config, expect) = &*shared;
            digest_path(&path, content, config, algorithm, expect.as_deref())
                .map(|entry| (index, entry))
        });
    }

    let mut entries = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        entries.push(joined.context("digest task panicked")??);
    }
    entries.sort_by_key(|(index, _)| *index);
    let entries: Vec<DigestEntry> = entries.into_iter().map(|(_, entry)| entry).collect();

    println!("{}", format_output(&entries, output_format)?);

    let mismatched: Vec<&str> = entries
        .iter()
        .filter(|entry| entry.matches == Some(false))
        .map(|entry| entry.path.as_str())
        .collect();

    if mismatched.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("Digest mismatch for: {}", mismatched.join(", "));
        Ok(ExitCode::MISMATCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockfs::{EMPTY_MD5, SourceKind};
    use mockfs_core::ByteSize;

    fn zero_args(size: u64) -> ContentArgs {
        ContentArgs {
            size: ByteSize::new(size),
            source: SourceKind::Zero,
            piece_size: None,
            mode: None,
            from: None,
        }
    }

    #[test]
    fn test_digest_path_zero() {
        let entry = digest_path(
            "/z",
            &zero_args(1),
            &GeneratorConfig::default(),
            DigestAlgorithm::Md5,
            None,
        )
        .unwrap();
        assert_eq!(entry.digest, "93b885adfe0da089cdf634904fd59f71");
        assert_eq!(entry.bytes, 1);
        assert_eq!(entry.matches, None);
    }

    #[test]
    fn test_digest_path_expect() {
        let config = GeneratorConfig::default();
        let entry =
            digest_path("/z", &zero_args(0), &config, DigestAlgorithm::Md5, Some(EMPTY_MD5))
                .unwrap();
        assert_eq!(entry.matches, Some(true));

        let entry =
            digest_path("/z", &zero_args(1), &config, DigestAlgorithm::Md5, Some(EMPTY_MD5))
                .unwrap();
        assert_eq!(entry.matches, Some(false));
    }

    #[tokio::test]
    async fn test_run_success_and_mismatch() {
        let code = run(
            vec!["/a".to_string(), "/b".to_string()],
            zero_args(0),
            None,
            Some(EMPTY_MD5.to_string()),
            GeneratorConfig::default(),
            OutputFormat::Json,
        )
        .await
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let code = run(
            vec!["/a".to_string()],
            zero_args(5),
            Some(DigestAlgorithm::Blake3),
            Some(EMPTY_MD5.to_string()),
            GeneratorConfig::default(),
            OutputFormat::Text,
        )
        .await
        .unwrap();
        assert_eq!(code, ExitCode::MISMATCH);
    }

    #[tokio::test]
    async fn test_run_propagates_invalid_file() {
        let mut args = zero_args(1);
        args.source = SourceKind::Buffer;
        let result = run(
            vec!["/b".to_string()],
            args,
            None,
            None,
            GeneratorConfig::default(),
            OutputFormat::Json,
        )
        .await;
        assert!(result.is_err());
    }
}
