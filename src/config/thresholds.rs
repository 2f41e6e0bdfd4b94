use serde::{Deserialize, Serialize};

/// Gap severity thresholds, in dollars per year.
///
/// Each bound is inclusive: a gap equal to `very_affordable_max` is still
/// very affordable. Values must be non-negative and strictly ascending.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    #[serde(default = "default_very_affordable_max")]
    pub very_affordable_max: f64,

    #[serde(default = "default_moderate_max")]
    pub moderate_max: f64,

    #[serde(default = "default_expensive_max")]
    pub expensive_max: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            very_affordable_max: default_very_affordable_max(),
            moderate_max: default_moderate_max(),
            expensive_max: default_expensive_max(),
        }
    }
}

impl SeverityThresholds {
    /// Check ordering and sign of the bounds.
    pub fn validate(&self) -> Result<(), String> {
        let bounds = [
            ("very_affordable_max", self.very_affordable_max),
            ("moderate_max", self.moderate_max),
            ("expensive_max", self.expensive_max),
        ];

        if let Some((name, value)) = bounds
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(format!("{} must be a non-negative number, got {}", name, value));
        }

        bounds
            .windows(2)
            .find(|pair| pair[0].1 >= pair[1].1)
            .map_or(Ok(()), |pair| {
                Err(format!(
                    "{} ({}) must be below {} ({})",
                    pair[0].0, pair[0].1, pair[1].0, pair[1].1
                ))
            })
    }
}

fn default_very_affordable_max() -> f64 {
    2500.0
}
fn default_moderate_max() -> f64 {
    7500.0
}
fn default_expensive_max() -> f64 {
    15000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SeverityThresholds::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_unordered_bounds() {
        let thresholds = SeverityThresholds {
            very_affordable_max: 8000.0,
            ..Default::default()
        };
        let err = thresholds.validate().unwrap_err();
        assert!(err.contains("very_affordable_max"));
    }

    #[test]
    fn test_rejects_negative_bounds() {
        let thresholds = SeverityThresholds {
            very_affordable_max: -1.0,
            ..Default::default()
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let thresholds: SeverityThresholds = toml::from_str("moderate_max = 9000").unwrap();
        assert_eq!(thresholds.very_affordable_max, 2500.0);
        assert_eq!(thresholds.moderate_max, 9000.0);
        assert_eq!(thresholds.expensive_max, 15000.0);
    }
}
