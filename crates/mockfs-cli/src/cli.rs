//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands
//! - `ContentArgs` - Options describing how a virtual file is generated

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use mockfs::{ByteRange, SourceKind};
use mockfs_core::{ByteSize, DigestAlgorithm, FileMode};
use std::path::PathBuf;

/// mockfs - deterministic virtual files for pipeline testing.
///
/// Declares a virtual file by path, size and content mode, then reports its
/// metadata, digests it or streams its bytes without ever storing them.
#[derive(Parser, Debug)]
#[command(name = "mockfs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,

    /// Generator configuration file
    ///
    /// Defaults to `<config dir>/mockfs/config.toml` when that file exists.
    #[arg(long, global = true, env = "MOCKFS_CONFIG")]
    pub config: Option<PathBuf>,
}

/// How a virtual file's content is produced.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ContentArgs {
    /// Declared file size (e.g. 4096, 16MiB, 2G)
    #[arg(short, long, default_value = "0")]
    pub size: ByteSize,

    /// Content mode: zero, random or buffer
    #[arg(long, default_value = "random")]
    pub source: SourceKind,

    /// Piece size for random content (overrides configuration)
    #[arg(long)]
    pub piece_size: Option<ByteSize>,

    /// Octal permission bits reported by stat (overrides configuration)
    #[arg(long)]
    pub mode: Option<FileMode>,

    /// Read buffer-mode content from this local file
    #[arg(long = "from", value_name = "FILE")]
    pub from: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show metadata of a virtual file.
    ///
    /// # Examples
    ///
    /// ```bash
    /// mockfs stat /test_dir/a.txt --size 16MiB
    /// mockfs stat /blob --source buffer --from ./payload.bin --format json
    /// ```
    Stat {
        /// Virtual path; keys the content of random files
        path: String,

        #[command(flatten)]
        content: ContentArgs,
    },

    /// Digest one or more virtual files.
    ///
    /// Paths are digested concurrently. With `--expect`, every digest must
    /// match or the command exits with status 3.
    ///
    /// # Examples
    ///
    /// ```bash
    /// mockfs digest file1 file3 --size 1MiB
    /// mockfs digest /zeros --source zero --size 1 --expect 93b885adfe0da089cdf634904fd59f71
    /// ```
    Digest {
        /// Virtual paths to digest
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,

        #[command(flatten)]
        content: ContentArgs,

        /// Digest algorithm (overrides configuration)
        #[arg(short, long)]
        algorithm: Option<DigestAlgorithm>,

        /// Expected digest, bare hex or `<algo>:<hex>`
        #[arg(long)]
        expect: Option<String>,
    },

    /// Write the bytes of a virtual file to stdout or a file.
    ///
    /// # Examples
    ///
    /// ```bash
    /// mockfs cat /test_dir/a.txt --size 4MiB --output a.bin
    /// mockfs cat /test_dir/a.txt --size 4MiB --range 1048576-2097151 | md5sum
    /// ```
    Cat {
        /// Virtual path; keys the content of random files
        path: String,

        #[command(flatten)]
        content: ContentArgs,

        /// Inclusive byte range `start-end` or `start-`
        #[arg(short, long)]
        range: Option<ByteRange>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions.
    ///
    /// # Examples
    ///
    /// ```bash
    /// mockfs completions bash > /etc/bash_completion.d/mockfs
    /// ```
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parsing_stat_defaults() {
        let cli = Cli::parse_from(["mockfs", "stat", "/a.txt"]);
        let Commands::Stat { path, content } = cli.command else {
            panic!("Expected Stat command");
        };
        assert_eq!(path, "/a.txt");
        assert_eq!(content.size, ByteSize::new(0));
        assert_eq!(content.source, SourceKind::Random);
        assert_eq!(content.piece_size, None);
        assert_eq!(content.mode, None);
        assert_eq!(content.from, None);
    }

    #[test]
    fn test_cli_parsing_content_args() {
        let cli = Cli::parse_from([
            "mockfs",
            "stat",
            "/z",
            "--size",
            "16MiB",
            "--source",
            "zero",
            "--piece-size",
            "64K",
            "--mode",
            "600",
        ]);
        let Commands::Stat { content, .. } = cli.command else {
            panic!("Expected Stat command");
        };
        assert_eq!(content.size, ByteSize::from_mib(16));
        assert_eq!(content.source, SourceKind::Zero);
        assert_eq!(content.piece_size, Some(ByteSize::new(64 * 1024)));
        assert_eq!(content.mode.map(FileMode::bits), Some(0o600));
    }

    #[test]
    fn test_cli_parsing_digest_multiple_paths() {
        let cli = Cli::parse_from([
            "mockfs", "digest", "file1", "file3", "--size", "1MiB", "-a", "blake3",
        ]);
        let Commands::Digest {
            paths,
            algorithm,
            expect,
            ..
        } = cli.command
        else {
            panic!("Expected Digest command");
        };
        assert_eq!(paths, vec!["file1", "file3"]);
        assert_eq!(algorithm, Some(DigestAlgorithm::Blake3));
        assert_eq!(expect, None);
    }

    #[test]
    fn test_cli_digest_requires_path() {
        assert!(Cli::try_parse_from(["mockfs", "digest"]).is_err());
    }

    #[test]
    fn test_cli_parsing_cat_range() {
        let cli = Cli::parse_from([
            "mockfs", "cat", "/x", "--size", "100", "--range", "10-19", "-o", "/tmp/out.bin",
        ]);
        let Commands::Cat { range, output, .. } = cli.command else {
            panic!("Expected Cat command");
        };
        assert_eq!(range, Some(ByteRange::new(10, 19).unwrap()));
        assert_eq!(output, Some(PathBuf::from("/tmp/out.bin")));
    }

    #[test]
    fn test_cli_rejects_bad_values() {
        assert!(Cli::try_parse_from(["mockfs", "stat", "/x", "--size", "lots"]).is_err());
        assert!(Cli::try_parse_from(["mockfs", "stat", "/x", "--source", "tape"]).is_err());
        assert!(Cli::try_parse_from(["mockfs", "stat", "/x", "--mode", "999"]).is_err());
        assert!(Cli::try_parse_from(["mockfs", "cat", "/x", "--range", "9-1"]).is_err());
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::parse_from([
            "mockfs",
            "stat",
            "/x",
            "--verbose",
            "--format",
            "json",
            "--config",
            "/etc/mockfs.toml",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.format, "json");
        assert_eq!(cli.config, Some(PathBuf::from("/etc/mockfs.toml")));
    }

    #[test]
    fn test_cli_default_format() {
        let cli = Cli::parse_from(["mockfs", "completions", "bash"]);
        assert_eq!(cli.format, "pretty");
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Bash }));
    }
}
