//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Retrieve IMDb lists as movie records
#[derive(Parser, Debug)]
#[command(name = "imdb-list")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Persist the result cache to this JSON file
    #[arg(long, global = true)]
    pub cache_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Retrieve a list and print its records
    Fetch {
        /// IMDb user id (urXXXXXXX)
        #[arg(long)]
        user_id: String,

        /// watchlist, ratings, checkins or a public list id
        #[arg(long)]
        list: String,
    },

    /// Print the first-page URL of a list
    Url {
        /// IMDb user id (urXXXXXXX)
        #[arg(long)]
        user_id: String,

        /// watchlist, ratings, checkins or a public list id
        #[arg(long)]
        list: String,
    },

    /// Show entries stored in the cache file
    Cache,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::parse_from([
            "imdb-list",
            "fetch",
            "--user-id",
            "ur1234567",
            "--list",
            "watchlist",
            "--format",
            "pretty",
        ]);

        assert_eq!(cli.format, OutputFormat::Pretty);
        match cli.command {
            Commands::Fetch { user_id, list } => {
                assert_eq!(user_id, "ur1234567");
                assert_eq!(list, "watchlist");
            }
            other => panic!("Expected Fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from([
            "imdb-list",
            "cache",
            "--cache-file",
            "/tmp/cache.json",
            "-v",
        ]);

        assert!(cli.verbose);
        assert_eq!(cli.cache_file, Some(PathBuf::from("/tmp/cache.json")));
        assert!(matches!(cli.command, Commands::Cache));
    }
}
