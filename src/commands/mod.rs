//! CLI command implementations for gapmap.
//!
//! Each submodule handles one subcommand: it takes a plain config struct
//! built from the parsed arguments, does the work against an [`AppContext`],
//! and renders the result as terminal text or JSON.
//!
//! Available commands:
//! - **search**: Find schools by family income, gap ceiling and filters
//! - **show**: Full cost report for one school
//! - **compare**: View and edit the compare list (up to 4 schools)
//! - **init**: Write a default `.gapmap.toml`

pub mod compare;
pub mod context;
pub mod init;
pub mod search;
pub mod show;

pub use compare::{run_compare, CompareConfig, CAPACITY_MESSAGE};
pub use context::{AppContext, DataSource, GlobalOptions};
pub use init::{init_config, init_config_at, DEFAULT_CONFIG};
pub use search::{run_search, search_view, SearchConfig};
pub use show::{run_show, ShowConfig};
