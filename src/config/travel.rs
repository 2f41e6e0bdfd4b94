use serde::{Deserialize, Serialize};

/// Travel cost rules relative to the family's home region.
///
/// States are grouped into drive tiers by distance; everything else is
/// assumed to be a flight. Costs are annual budgets covering roughly five
/// round trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelConfig {
    /// Where families travel from, used in display text
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Fill missing travel fields from the rules below when loading data
    #[serde(default)]
    pub estimate_missing: bool,

    #[serde(default = "default_close_drive_states")]
    pub close_drive_states: Vec<String>,
    #[serde(default = "default_close_drive_cost")]
    pub close_drive_cost: f64,

    #[serde(default = "default_medium_drive_states")]
    pub medium_drive_states: Vec<String>,
    #[serde(default = "default_medium_drive_cost")]
    pub medium_drive_cost: f64,

    #[serde(default = "default_far_drive_states")]
    pub far_drive_states: Vec<String>,
    #[serde(default = "default_far_drive_cost")]
    pub far_drive_cost: f64,

    #[serde(default = "default_fly_cost")]
    pub fly_cost: f64,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            estimate_missing: false,
            close_drive_states: default_close_drive_states(),
            close_drive_cost: default_close_drive_cost(),
            medium_drive_states: default_medium_drive_states(),
            medium_drive_cost: default_medium_drive_cost(),
            far_drive_states: default_far_drive_states(),
            far_drive_cost: default_far_drive_cost(),
            fly_cost: default_fly_cost(),
        }
    }
}

fn states(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|s| s.to_string()).collect()
}

fn default_origin() -> String {
    "the Poconos".to_string()
}
fn default_close_drive_states() -> Vec<String> {
    states(&["PA", "NJ", "DE"])
}
fn default_close_drive_cost() -> f64 {
    600.0
}
fn default_medium_drive_states() -> Vec<String> {
    states(&["NY", "CT", "MD", "DC"])
}
fn default_medium_drive_cost() -> f64 {
    1000.0
}
fn default_far_drive_states() -> Vec<String> {
    states(&["MA", "RI", "VA", "WV", "VT", "NH", "ME"])
}
fn default_far_drive_cost() -> f64 {
    1500.0
}
fn default_fly_cost() -> f64 {
    2500.0
}
