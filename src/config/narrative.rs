use serde::{Deserialize, Serialize};

/// Tuning knobs for the plain-language narrative.
///
/// Rates are percentages (0-100), not fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NarrativeConfig {
    /// Pell graduation rate at or above which outcomes are "excellent"
    #[serde(default = "default_excellent_pell_rate")]
    pub excellent_pell_rate: f64,

    #[serde(default = "default_solid_pell_rate")]
    pub solid_pell_rate: f64,

    #[serde(default = "default_fair_pell_rate")]
    pub fair_pell_rate: f64,

    /// Overall minus Pell graduation rate, in points, above which the
    /// equity warning fires
    #[serde(default = "default_equity_gap_points")]
    pub equity_gap_points: f64,

    /// Gaps below this still read as a good deal despite flying home
    #[serde(default = "default_good_deal_gap_max")]
    pub good_deal_gap_max: f64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            excellent_pell_rate: default_excellent_pell_rate(),
            solid_pell_rate: default_solid_pell_rate(),
            fair_pell_rate: default_fair_pell_rate(),
            equity_gap_points: default_equity_gap_points(),
            good_deal_gap_max: default_good_deal_gap_max(),
        }
    }
}

impl NarrativeConfig {
    pub fn validate(&self) -> Result<(), String> {
        let tiers_descend = self.excellent_pell_rate > self.solid_pell_rate
            && self.solid_pell_rate > self.fair_pell_rate
            && self.fair_pell_rate > 0.0;
        if !tiers_descend {
            return Err(format!(
                "pell rate tiers must descend above zero, got {}/{}/{}",
                self.excellent_pell_rate, self.solid_pell_rate, self.fair_pell_rate
            ));
        }
        if self.excellent_pell_rate > 100.0 {
            return Err("excellent_pell_rate cannot exceed 100".to_string());
        }
        if self.equity_gap_points < 0.0 || self.good_deal_gap_max < 0.0 {
            return Err("equity_gap_points and good_deal_gap_max must be non-negative".to_string());
        }
        Ok(())
    }
}

fn default_excellent_pell_rate() -> f64 {
    80.0
}
fn default_solid_pell_rate() -> f64 {
    60.0
}
fn default_fair_pell_rate() -> f64 {
    40.0
}
fn default_equity_gap_points() -> f64 {
    15.0
}
fn default_good_deal_gap_max() -> f64 {
    3000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(NarrativeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_tiers() {
        let config = NarrativeConfig {
            solid_pell_rate: 90.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
