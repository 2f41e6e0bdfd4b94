use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::IncomeBracket;

#[derive(Parser, Debug)]
#[command(name = "gapmap")]
#[command(about = "Find colleges your family can afford", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: .gapmap.toml in this directory or a parent)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Local JSON export of the schools table
    #[arg(long, global = true, env = "GAPMAP_DATA")]
    pub data: Option<PathBuf>,

    /// PostgREST base URL serving the schools table
    #[arg(long, global = true, env = "GAPMAP_REMOTE")]
    pub remote: Option<String>,

    /// File holding the saved compare list
    #[arg(long = "state", global = true)]
    pub state_file: Option<PathBuf>,

    /// Disable colors
    #[arg(long, global = true)]
    pub plain: bool,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search schools by what your family would pay
    Search {
        /// Family income bracket (0-30k, 30-48k, 48-75k, 75-110k, 110k+)
        #[arg(short, long, default_value = "0-30k")]
        income: IncomeBracket,

        /// Only schools with an annual gap at or below this amount
        #[arg(long)]
        max_gap: Option<f64>,

        /// Only schools with a no-loan policy
        #[arg(long)]
        no_loan_only: bool,

        /// Only schools in this state (two-letter code)
        #[arg(long = "in-state")]
        in_state: Option<String>,

        /// Maximum number of results (default from [data] search_limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the full cost breakdown for one school
    Show {
        /// School id
        id: String,

        #[arg(short, long, default_value = "0-30k")]
        income: IncomeBracket,

        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage and view the compare list (up to 4 schools)
    Compare {
        #[command(subcommand)]
        action: Option<CompareAction>,

        #[arg(short, long, default_value = "0-30k", global = true)]
        income: IncomeBracket,

        #[arg(short, long, value_enum, default_value = "terminal", global = true)]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CompareAction {
    /// Show the saved schools side by side (default)
    Show,
    /// Add a school id
    Add { id: String },
    /// Remove a school id
    Remove { id: String },
    /// Add the id if absent, remove it if present
    Toggle { id: String },
    /// Empty the list
    Clear,
    /// Find schools by name to add
    Find { query: String },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
