//! Gap severity classification.
//!
//! Classification is a first-match chain of small predicates over the signed
//! gap; upper bounds are inclusive. Colors are resolved separately because a
//! record may carry a precomputed tag that disagrees with the live gap.

use serde::Serialize;
use std::fmt;

use crate::config::SeverityThresholds;
use crate::core::SeverityTag;

/// Qualitative bucket for a family's annual gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapSeverity {
    Unknown,
    MoneyBack,
    Free,
    VeryAffordable,
    Moderate,
    Expensive,
    VeryExpensive,
}

impl GapSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            GapSeverity::Unknown => "Unknown",
            GapSeverity::MoneyBack => "Money Back",
            GapSeverity::Free => "Free",
            GapSeverity::VeryAffordable => "Very Affordable",
            GapSeverity::Moderate => "Moderate",
            GapSeverity::Expensive => "Expensive",
            GapSeverity::VeryExpensive => "Very Expensive",
        }
    }

    /// Kebab-case key, matching the JSON representation
    pub fn slug(&self) -> &'static str {
        match self {
            GapSeverity::Unknown => "unknown",
            GapSeverity::MoneyBack => "money-back",
            GapSeverity::Free => "free",
            GapSeverity::VeryAffordable => "very-affordable",
            GapSeverity::Moderate => "moderate",
            GapSeverity::Expensive => "expensive",
            GapSeverity::VeryExpensive => "very-expensive",
        }
    }

    pub fn color(&self) -> SeverityColor {
        match self {
            GapSeverity::Unknown => SeverityColor::Neutral,
            GapSeverity::MoneyBack | GapSeverity::Free | GapSeverity::VeryAffordable => {
                SeverityColor::Low
            }
            GapSeverity::Moderate => SeverityColor::Medium,
            GapSeverity::Expensive => SeverityColor::High,
            GapSeverity::VeryExpensive => SeverityColor::Critical,
        }
    }
}

impl fmt::Display for GapSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse four-step display color, plus neutral for unreported gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityColor {
    Neutral,
    Low,
    Medium,
    High,
    Critical,
}

impl From<SeverityTag> for SeverityColor {
    fn from(tag: SeverityTag) -> Self {
        match tag {
            SeverityTag::Low => SeverityColor::Low,
            SeverityTag::Medium => SeverityColor::Medium,
            SeverityTag::High => SeverityColor::High,
            SeverityTag::Critical => SeverityColor::Critical,
        }
    }
}

fn is_money_back(gap: f64) -> bool {
    gap < 0.0
}

fn is_free(gap: f64) -> bool {
    gap == 0.0
}

fn at_most(gap: f64, max: f64) -> bool {
    gap <= max
}

/// Classify a live gap against the configured thresholds
pub fn classify(gap: Option<f64>, thresholds: &SeverityThresholds) -> GapSeverity {
    let Some(gap) = gap else {
        return GapSeverity::Unknown;
    };

    if is_money_back(gap) {
        GapSeverity::MoneyBack
    } else if is_free(gap) {
        GapSeverity::Free
    } else if at_most(gap, thresholds.very_affordable_max) {
        GapSeverity::VeryAffordable
    } else if at_most(gap, thresholds.moderate_max) {
        GapSeverity::Moderate
    } else if at_most(gap, thresholds.expensive_max) {
        GapSeverity::Expensive
    } else {
        GapSeverity::VeryExpensive
    }
}

/// Display color for a school at the selected bracket.
///
/// The sign of the live gap always wins: money back is `Low` whatever the
/// record's precomputed tag says. Otherwise the tag is used when present,
/// falling back to the color of the live classification.
pub fn resolve_color(
    gap: Option<f64>,
    tag: Option<SeverityTag>,
    thresholds: &SeverityThresholds,
) -> SeverityColor {
    match (gap, tag) {
        (Some(gap), _) if is_money_back(gap) => SeverityColor::Low,
        (_, Some(tag)) => SeverityColor::from(tag),
        (gap, None) => classify(gap, thresholds).color(),
    }
}
