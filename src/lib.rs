// Export modules for library usage
pub mod affordability;
pub mod cli;
pub mod commands;
pub mod compare;
pub mod config;
pub mod core;
pub mod data;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod output;

// Re-export commonly used types
pub use crate::core::{IncomeBracket, School, SeverityTag, TravelMode};

pub use crate::affordability::{
    classify, resolve_color, resolve_gap, Assessor, CostBreakdown, CostView, GapSeverity,
    Narrative, SchoolReport, SeverityColor,
};

pub use crate::compare::{CompareList, FileKvStore, KeyValueStore, MemoryKvStore, MAX_COMPARE};

pub use crate::config::{GapmapConfig, NarrativeConfig, SeverityThresholds, TravelConfig};

pub use crate::data::{LocalStore, RestStore, SchoolQuery, SchoolStore, SearchCriteria};

pub use crate::errors::{Error, Result};

pub use crate::formatting::{format_money, format_percent, format_signed_money, normalize_url};
