use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::narrative::NarrativeConfig;
use super::thresholds::SeverityThresholds;
use super::travel::TravelConfig;

/// Root configuration structure for gapmap
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GapmapConfig {
    /// Gap severity thresholds
    #[serde(default)]
    pub thresholds: Option<SeverityThresholds>,

    /// Narrative wording thresholds
    #[serde(default)]
    pub narrative: Option<NarrativeConfig>,

    /// Travel cost estimation rules
    #[serde(default)]
    pub travel: Option<TravelConfig>,

    /// Where school records come from
    #[serde(default)]
    pub data: Option<DataConfig>,

    /// Compare list persistence
    #[serde(default)]
    pub compare: Option<CompareConfig>,
}

/// School data source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Local JSON export of the schools table
    #[serde(default)]
    pub source: Option<PathBuf>,

    /// Base URL of a PostgREST endpoint serving the schools table
    #[serde(default)]
    pub rest_url: Option<String>,

    /// Environment variable holding the API key for `rest_url`
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_table")]
    pub table: String,

    /// Row limit for affordability searches
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Row limit for compare-list name lookups
    #[serde(default = "default_quick_search_limit")]
    pub quick_search_limit: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: None,
            rest_url: None,
            api_key_env: default_api_key_env(),
            table: default_table(),
            search_limit: default_search_limit(),
            quick_search_limit: default_quick_search_limit(),
        }
    }
}

fn default_api_key_env() -> String {
    "GAPMAP_API_KEY".to_string()
}
fn default_table() -> String {
    "schools".to_string()
}
fn default_search_limit() -> usize {
    100
}
fn default_quick_search_limit() -> usize {
    10
}

/// Compare list persistence configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CompareConfig {
    /// State file holding the saved compare list
    #[serde(default)]
    pub state_file: Option<PathBuf>,
}
