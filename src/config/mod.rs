//! Configuration for gapmap, read from `.gapmap.toml`.
//!
//! Every section is optional and every field has a `default_*` function, so
//! an empty file (or no file) yields the built-in behaviour. Accessors on
//! [`GapmapConfig`] resolve missing sections to their defaults.

mod accessors;
mod core;
mod loader;
mod narrative;
mod thresholds;
mod travel;

pub use accessors::STATE_FILE_ENV;
pub use core::{CompareConfig, DataConfig, GapmapConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use narrative::NarrativeConfig;
pub use thresholds::SeverityThresholds;
pub use travel::TravelConfig;
