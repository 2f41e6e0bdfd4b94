use serde::Serialize;

use super::cost::CostBreakdown;
use super::severity::{GapSeverity, SeverityColor};
use crate::core::IncomeBracket;

/// Derived per-bracket cost view for one school.
///
/// Recomputed whenever the bracket changes and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostView {
    pub school_id: String,
    pub bracket: IncomeBracket,
    #[serde(flatten)]
    pub cost: CostBreakdown,
    pub severity: GapSeverity,
    pub severity_label: &'static str,
    pub color: SeverityColor,
    pub narrative: String,
}

impl CostView {
    pub fn gap(&self) -> Option<f64> {
        self.cost.gap
    }

    pub fn true_annual_cost(&self) -> f64 {
        self.cost.true_annual_cost
    }

    pub fn four_year_gap(&self) -> Option<f64> {
        self.cost.four_year_gap
    }

    pub fn four_year_true_cost(&self) -> f64 {
        self.cost.four_year_true_cost
    }
}

/// One line of the gap-by-family-income table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketRow {
    pub bracket: IncomeBracket,
    pub label: &'static str,
    pub gap: Option<f64>,
    pub four_year_gap: Option<f64>,
    pub severity: GapSeverity,
    pub selected: bool,
}
