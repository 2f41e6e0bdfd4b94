use std::path::PathBuf;

use super::core::{DataConfig, GapmapConfig};
use super::narrative::NarrativeConfig;
use super::thresholds::SeverityThresholds;
use super::travel::TravelConfig;

/// Environment variable overriding the compare-list state file
pub const STATE_FILE_ENV: &str = "GAPMAP_STATE_FILE";

impl GapmapConfig {
    /// Severity thresholds (defaults if not configured)
    pub fn severity_thresholds(&self) -> SeverityThresholds {
        self.thresholds.unwrap_or_default()
    }

    /// Narrative thresholds (defaults if not configured)
    pub fn narrative_config(&self) -> NarrativeConfig {
        self.narrative.unwrap_or_default()
    }

    pub fn travel_config(&self) -> TravelConfig {
        self.travel.clone().unwrap_or_default()
    }

    pub fn data_config(&self) -> DataConfig {
        self.data.clone().unwrap_or_default()
    }

    /// Resolve the compare-list state file.
    ///
    /// Precedence: `GAPMAP_STATE_FILE`, then `[compare] state_file`, then
    /// `<data dir>/gapmap/state.json`.
    pub fn state_file(&self) -> Option<PathBuf> {
        std::env::var_os(STATE_FILE_ENV)
            .map(PathBuf::from)
            .or_else(|| self.compare.as_ref().and_then(|c| c.state_file.clone()))
            .or_else(default_state_file)
    }
}

fn default_state_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("gapmap").join("state.json"))
}
