//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Solidafy Scroll CLI
#[derive(Parser, Debug)]
#[command(name = "solidafy-scroll")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Cluster URL, overrides the config file
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scroll through all matching documents
    Scan {
        #[command(flatten)]
        scan: ScanArgs,

        /// What to print for each document
        #[arg(short, long, default_value = "source")]
        format: OutputFormat,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// Report the total number of matching documents
    Count {
        #[command(flatten)]
        scan: ScanArgs,
    },
}

/// Arguments describing the scan itself
#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Scan definition file (YAML or JSON); flags below are applied on top
    #[arg(long)]
    pub scan_file: Option<PathBuf>,

    /// Index to scan (repeatable)
    #[arg(short, long = "index")]
    pub indices: Vec<String>,

    /// Type to scan (repeatable)
    #[arg(short, long = "type")]
    pub types: Vec<String>,

    /// File holding the query as JSON
    #[arg(short, long, conflicts_with = "query_json")]
    pub query_file: Option<PathBuf>,

    /// Inline query JSON
    #[arg(long)]
    pub query_json: Option<String>,

    /// Page size hint
    #[arg(short, long)]
    pub size: Option<u32>,

    /// Scroll context keep-alive, e.g. 5m
    #[arg(long)]
    pub scroll: Option<String>,

    /// Ask the server for indented JSON
    #[arg(long)]
    pub pretty: bool,

    /// Log every request and response
    #[arg(long)]
    pub debug: bool,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// The document `_source` (the whole hit when there is none)
    #[default]
    Source,
    /// The whole hit including `_index`, `_id` and `_score`
    Hit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan() {
        let cli = Cli::try_parse_from([
            "solidafy-scroll",
            "-u",
            "http://localhost:9200",
            "scan",
            "-i",
            "logs",
            "-i",
            "metrics",
            "-t",
            "event",
            "--size",
            "250",
            "--scroll",
            "1m",
            "--max-pages",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.url.as_deref(), Some("http://localhost:9200"));
        match cli.command {
            Commands::Scan {
                scan,
                format,
                max_pages,
            } => {
                assert_eq!(scan.indices, vec!["logs", "metrics"]);
                assert_eq!(scan.types, vec!["event"]);
                assert_eq!(scan.size, Some(250));
                assert_eq!(scan.scroll.as_deref(), Some("1m"));
                assert_eq!(format, OutputFormat::Source);
                assert_eq!(max_pages, Some(3));
            }
            Commands::Count { .. } => panic!("Expected Scan"),
        }
    }

    #[test]
    fn test_parse_count_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["solidafy-scroll", "count", "-i", "logs", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Count { .. }));
    }

    #[test]
    fn test_query_sources_conflict() {
        let result = Cli::try_parse_from([
            "solidafy-scroll",
            "scan",
            "--query-file",
            "q.json",
            "--query-json",
            "{}",
        ]);
        assert!(result.is_err());
    }
}
