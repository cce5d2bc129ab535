//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for score-quorum
#[derive(Parser, Debug)]
#[command(name = "score-quorum")]
#[command(author, version, about = "Split ensemble scores into instrument parts by oracle consensus")]
#[command(long_about = r#"
Score Quorum asks a document-reading model where each instrument part of a
score begins and ends, several times in parallel, and keeps only what a
quorum of the answers agree on. The agreed ranges can then be cut into one
PDF per part.

Configuration files are loaded from (in priority order):
1. --config <path>               Explicit config file
2. ./score-quorum.toml           Project-level config
3. ~/.config/score-quorum/config.toml   Global config

Environment variables prefixed with SCORE_QUORUM_ override files
(nested keys use a double underscore, e.g. SCORE_QUORUM_ANALYSIS__REPLICATES=5).

Example:
  score-quorum analyse march.pdf
  score-quorum split march.pdf -o parts/ -r 5
  score-quorum split march.pdf --parts march.parts.json
  score-quorum normalize suite.pdf -o suite_landscape.pdf
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Write diagnostic logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Detect instrument parts and print the consensus
    Analyse(AnalyseArgs),

    /// Detect instrument parts (or read them from a file) and write one PDF per part
    Split(SplitArgs),

    /// Rotate pages so the whole document shares the majority orientation
    Normalize(NormalizeArgs),

    /// Print the content digest of a file
    Hash(HashArgs),

    /// Show configuration file locations
    Config,
}

#[derive(Args, Debug)]
pub struct AnalyseArgs {
    /// Local PDF path or http(s) URL
    #[arg(
        value_name = "PDF|URL",
        required_unless_present = "file_url",
        conflicts_with = "file_url"
    )]
    pub source: Option<String>,

    /// Let the oracle fetch this URL itself instead of uploading
    #[arg(long, value_name = "URL")]
    pub file_url: Option<String>,

    /// Number of parallel replicas
    #[arg(short, long, value_name = "N")]
    pub replicates: Option<usize>,

    /// Treat the document as a single part and only identify it
    #[arg(long)]
    pub single_part: bool,
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Local PDF path or http(s) URL
    #[arg(value_name = "PDF|URL")]
    pub source: String,

    /// JSON file with instrument ranges; skips analysis
    #[arg(long, value_name = "PATH")]
    pub parts: Option<PathBuf>,

    /// Output directory (default: <stem>_parts next to the input)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Number of parallel replicas
    #[arg(short, long, value_name = "N", conflicts_with = "parts")]
    pub replicates: Option<usize>,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Local PDF path
    #[arg(value_name = "PDF")]
    pub source: PathBuf,

    /// Output file (default: a fresh file in the cache directory)
    #[arg(short, long, value_name = "OUT")]
    pub output: Option<PathBuf>,

    /// Landscape share (percent) above which the document becomes landscape
    #[arg(long, value_name = "P")]
    pub threshold: Option<f64>,
}

#[derive(Args, Debug)]
pub struct HashArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Whether `source` names a remote document
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
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
    fn test_analyse_requires_exactly_one_input() {
        assert!(Cli::try_parse_from(["score-quorum", "analyse"]).is_err());
        assert!(
            Cli::try_parse_from([
                "score-quorum",
                "analyse",
                "a.pdf",
                "--file-url",
                "https://example.org/a.pdf"
            ])
            .is_err()
        );

        let cli = Cli::try_parse_from(["score-quorum", "analyse", "--file-url", "https://x/a.pdf"])
            .unwrap();
        let Command::Analyse(args) = cli.command else {
            panic!("expected analyse");
        };
        assert!(args.source.is_none());
        assert_eq!(args.file_url.as_deref(), Some("https://x/a.pdf"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["score-quorum", "split", "a.pdf", "-o", "out", "-vv", "--json"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        let Command::Split(args) = cli.command else {
            panic!("expected split");
        };
        assert_eq!(args.output, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_parts_file_conflicts_with_replicates() {
        assert!(
            Cli::try_parse_from(["score-quorum", "split", "a.pdf", "--parts", "p.json", "-r", "3"])
                .is_err()
        );
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.org/a.pdf"));
        assert!(!is_url("scores/a.pdf"));
    }
}
