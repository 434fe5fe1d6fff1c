//! Command-line interface definitions for svgdupe.
//!
//! This module defines all CLI arguments and options using the clap
//! derive API.
//!
//! # Example
//!
//! ```bash
//! # Find similar SVGs under a directory
//! svgdupe ~/icons
//!
//! # JSON output for scripting
//! svgdupe ~/icons --output json
//!
//! # Verbose mode for debugging
//! svgdupe -v ~/icons
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Find and group exact and near-duplicate SVG files.
///
/// svgdupe fingerprints canonicalized SVG content (BLAKE3) to collapse
/// exact duplicates, then compares the remaining files pairwise for
/// textual similarity and clusters the matches into groups.
#[derive(Debug, Parser)]
#[command(name = "svgdupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing SVG files to compare
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output and all logging except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Number of comparison worker threads (default: CPU count - 1)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Emit fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Output format for the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored human-readable report
    Text,
    /// Machine-readable JSON report
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_directory() {
        let cli = Cli::try_parse_from(["svgdupe", "/tmp/icons"]).unwrap();
        assert_eq!(cli.directory, PathBuf::from("/tmp/icons"));
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(cli.threads.is_none());
    }

    #[test]
    fn test_cli_requires_directory() {
        assert!(Cli::try_parse_from(["svgdupe"]).is_err());
    }

    #[test]
    fn test_cli_flags() {
        let cli =
            Cli::try_parse_from(["svgdupe", "-vv", "--threads", "3", "--output", "json", "dir"])
                .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.threads, Some(3));
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["svgdupe", "-q", "-v", "dir"]).is_err());
    }
}
