//! Travel mode and budget derived from a school's state.

use crate::config::TravelConfig;
use crate::core::{School, TravelMode};

/// Estimated annual travel for a school in `state`.
///
/// Drive tiers are checked nearest first; unknown or missing states fly.
pub fn estimate_travel(state: Option<&str>, config: &TravelConfig) -> (TravelMode, f64) {
    let state = state.map(|s| s.trim().to_ascii_uppercase()).unwrap_or_default();
    let listed = |states: &[String]| states.iter().any(|s| s.eq_ignore_ascii_case(&state));

    if state.is_empty() {
        (TravelMode::Fly, config.fly_cost)
    } else if listed(config.close_drive_states.as_slice()) {
        (TravelMode::Drive, config.close_drive_cost)
    } else if listed(config.medium_drive_states.as_slice()) {
        (TravelMode::Drive, config.medium_drive_cost)
    } else if listed(config.far_drive_states.as_slice()) {
        (TravelMode::Drive, config.far_drive_cost)
    } else {
        (TravelMode::Fly, config.fly_cost)
    }
}

/// Fill travel fields the dataset left empty. Reported values are kept.
///
/// Returns whether anything changed.
pub fn fill_missing_travel(school: &mut School, config: &TravelConfig) -> bool {
    if school.travel_type.is_some() && school.annual_travel_cost.is_some() {
        return false;
    }
    let (mode, cost) = estimate_travel(school.state.as_deref(), config);
    school.travel_type.get_or_insert(mode);
    school.annual_travel_cost.get_or_insert(cost);
    true
}
