use std::path::PathBuf;

use clap::Parser;

use crate::materialize::Backend;
use crate::search::ALL_SENTINEL;

#[derive(Parser, Debug)]
#[command(name = "ws-audit")]
#[command(author, version, about = "Audit popular repositories for long whitespace runs")]
#[command(long_about = "Searches a code-hosting service for popular repositories, clones each \
    one shallowly and records every source line that contains a long run of spaces or tabs.\n\n\
    One evidence file is written per offending line.\n\n\
    Exit codes:\n  \
    0 - Run completed (with or without findings)\n  \
    2 - Configuration or runtime error")]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Topic to search for, or `all` for the most-starred repositories
    #[arg(default_value = ALL_SENTINEL)]
    pub query: String,

    /// Minimum run of spaces/tabs that marks a line (overrides config)
    #[arg(short, long)]
    pub threshold: Option<usize>,

    /// Maximum number of repositories to audit (overrides config)
    #[arg(short = 'n', long)]
    pub max_repos: Option<usize>,

    /// File extensions to scan (comma-separated, e.g., .py,.js)
    #[arg(short, long, value_delimiter = ',')]
    pub ext: Option<Vec<String>>,

    /// Check out only files matching the scanned extensions, when the backend supports it
    #[arg(long)]
    pub narrow: bool,

    /// Clone backend (overrides config)
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,

    /// Number of worker threads; 0 picks one less than the available cores
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Directory receiving evidence records (overrides config)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// API token for the search service
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Search endpoint URL (overrides config)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Send QUERY to the search service unchanged instead of as a topic
    #[arg(long)]
    pub raw_query: bool,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip loading configuration file
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// Ask for query, threshold, repository count, verbosity and narrowing on stdin
    #[arg(short, long)]
    pub interactive: bool,

    /// Increase output verbosity (-v, -vv, -vvv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
