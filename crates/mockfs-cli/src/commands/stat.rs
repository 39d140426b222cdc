//! Stat command implementation.
//!
//! Reports the metadata a consumer would see from `stat` on the handle,
//! plus the generation parameters behind the content.

use super::common::open_file;
use crate::cli::ContentArgs;
use crate::formatters::format_output;
use anyhow::Result;
use chrono::{DateTime, Utc};
use mockfs::{SourceKind, VirtualFile};
use mockfs_core::cli::{ExitCode, OutputFormat};
use mockfs_core::GeneratorConfig;
use serde::Serialize;
use tracing::info;

/// Metadata of one virtual file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatOutput {
    /// Virtual path
    pub path: String,
    /// Content length in bytes
    pub size: u64,
    /// Symbolic permission bits, e.g. `rw-r--r--`
    pub mode: String,
    /// Octal permission bits
    pub mode_octal: String,
    /// Modification time fixed at construction
    pub mod_time: DateTime<Utc>,
    /// Whether the handle is a directory
    pub is_directory: bool,
    /// Content mode
    pub source: Option<SourceKind>,
    /// Seed of random content
    pub seed: Option<i64>,
}

impl From<&VirtualFile> for StatOutput {
    fn from(file: &VirtualFile) -> Self {
        let info = file.stat();
        Self {
            path: info.name.clone(),
            size: info.size,
            mode: info.mode.to_string(),
            mode_octal: format!("{:o}", info.mode.bits()),
            mod_time: info.mod_time,
            is_directory: info.is_directory,
            source: file.source_kind(),
            seed: file.seed().map(mockfs_core::Seed::get),
        }
    }
}

/// Runs the stat command.
///
/// # Errors
///
/// Returns an error if the file description is invalid or output
/// formatting fails.
pub fn run(
    path: &str,
    content: &ContentArgs,
    config: &GeneratorConfig,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    info!("Stat {path}");
    let file = open_file(path, content, config)?;
    let output = StatOutput::from(&file);
    println!("{}", format_output(&output, output_format)?);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockfs_core::{ByteSize, FileMode};

    #[test]
    fn test_stat_output_from_random_file() {
        let file = VirtualFile::random("file1", FileMode::FILE, 2048);
        let output = StatOutput::from(&file);
        assert_eq!(output.path, "file1");
        assert_eq!(output.size, 2048);
        assert_eq!(output.mode, "rw-r--r--");
        assert_eq!(output.mode_octal, "644");
        assert_eq!(output.source, Some(SourceKind::Random));
        assert_eq!(output.seed, Some(4096));
        assert!(!output.is_directory);
    }

    #[test]
    fn test_stat_output_zero_has_no_seed() {
        let file = VirtualFile::zero("/z", FileMode::ALL, 1);
        let output = StatOutput::from(&file);
        assert_eq!(output.seed, None);
        assert_eq!(output.mode, "rwxrwxrwx");
    }

    #[test]
    fn test_stat_output_serializes_source_lowercase() {
        let file = VirtualFile::zero("/z", FileMode::FILE, 1);
        let json = serde_json::to_string(&StatOutput::from(&file)).unwrap();
        assert!(json.contains("\"source\":\"zero\""));
    }

    #[test]
    fn test_run_stat() {
        let content = ContentArgs {
            size: ByteSize::new(10),
            source: SourceKind::Zero,
            piece_size: None,
            mode: None,
            from: None,
        };
        let code = run("/z", &content, &GeneratorConfig::default(), OutputFormat::Json).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }
}
