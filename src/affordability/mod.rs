//! Affordability engine: the pure pipeline from a school record and an income
//! bracket to the figures, severity and narrative a family sees.
//!
//! ```text
//! resolve_gap -> CostBreakdown -> classify / resolve_color -> narrative
//! ```
//!
//! Nothing here performs I/O.

pub mod cost;
pub mod narrative;
mod report;
pub mod severity;
mod view;

pub use cost::{estimated_grant_aid, CostBreakdown};
pub use narrative::{Narrative, NarrativeContext};
pub use report::{Admissions, Links, Outcomes, SchoolReport, TravelInfo};
pub use severity::{classify, resolve_color, GapSeverity, SeverityColor};
pub use view::{BracketRow, CostView};

use crate::config::{GapmapConfig, NarrativeConfig, SeverityThresholds};
use crate::core::{IncomeBracket, School};

/// The gap a family in `bracket` would pay at `school`.
///
/// Exactly one of the five bracket fields is read; they are alternative
/// views of one quantity and are never combined.
pub fn resolve_gap(school: &School, bracket: IncomeBracket) -> Option<f64> {
    bracket.gap_of(school)
}

/// Builds cost views and reports with one set of thresholds.
#[derive(Debug, Clone)]
pub struct Assessor {
    thresholds: SeverityThresholds,
    narrative: NarrativeConfig,
    origin: String,
}

impl Default for Assessor {
    fn default() -> Self {
        Self::from_config(&GapmapConfig::default())
    }
}

impl Assessor {
    pub fn new(thresholds: SeverityThresholds, narrative: NarrativeConfig, origin: String) -> Self {
        Self {
            thresholds,
            narrative,
            origin,
        }
    }

    pub fn from_config(config: &GapmapConfig) -> Self {
        Self::new(
            config.severity_thresholds(),
            config.narrative_config(),
            config.travel_config().origin,
        )
    }

    pub fn thresholds(&self) -> &SeverityThresholds {
        &self.thresholds
    }

    pub fn narrative(&self, school: &School, bracket: IncomeBracket) -> Narrative {
        let context = NarrativeContext {
            school,
            gap: resolve_gap(school, bracket),
            bracket,
            thresholds: &self.thresholds,
            config: &self.narrative,
            origin: &self.origin,
        };
        narrative::generate(&context)
    }

    pub fn cost_view(&self, school: &School, bracket: IncomeBracket) -> CostView {
        let gap = resolve_gap(school, bracket);
        let severity = classify(gap, &self.thresholds);
        CostView {
            school_id: school.id.clone(),
            bracket,
            cost: CostBreakdown::compose(gap, school.annual_travel_cost),
            severity,
            severity_label: severity.label(),
            color: resolve_color(gap, school.gap_severity, &self.thresholds),
            narrative: self.narrative(school, bracket).text(),
        }
    }

    /// Every bracket's gap for one school, lowest income first
    pub fn gap_table(&self, school: &School, selected: IncomeBracket) -> Vec<BracketRow> {
        IncomeBracket::ALL
            .iter()
            .map(|&bracket| {
                let gap = resolve_gap(school, bracket);
                BracketRow {
                    bracket,
                    label: bracket.label(),
                    gap,
                    four_year_gap: cost::four_year_gap(gap),
                    severity: classify(gap, &self.thresholds),
                    selected: bracket == selected,
                }
            })
            .collect()
    }

    pub fn report(&self, school: &School, bracket: IncomeBracket) -> SchoolReport {
        let cost = self.cost_view(school, bracket);
        let aid = estimated_grant_aid(school.cost_of_attendance, cost.gap());
        SchoolReport::assemble(school, cost, self.gap_table(school, bracket), aid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SeverityTag;

    fn school_with_gaps() -> School {
        School {
            id: "7".into(),
            name: "Bracket College".into(),
            gap_0_30k: Some(100.0),
            gap_30_48k: Some(200.0),
            gap_48_75k: Some(300.0),
            gap_75_110k: None,
            gap_110k_plus: Some(500.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_gap_reads_only_the_bracket_field() {
        let school = school_with_gaps();
        assert_eq!(resolve_gap(&school, IncomeBracket::Under30k), Some(100.0));
        assert_eq!(resolve_gap(&school, IncomeBracket::From30kTo48k), Some(200.0));
        assert_eq!(resolve_gap(&school, IncomeBracket::From48kTo75k), Some(300.0));
        assert_eq!(resolve_gap(&school, IncomeBracket::From75kTo110k), None);
        assert_eq!(resolve_gap(&school, IncomeBracket::Over110k), Some(500.0));
    }

    #[test]
    fn test_cost_view_for_money_back_ignores_stale_tag() {
        let school = School {
            gap_110k_plus: Some(-1500.0),
            annual_travel_cost: Some(800.0),
            gap_severity: Some(SeverityTag::Critical),
            ..Default::default()
        };
        let view = Assessor::default().cost_view(&school, IncomeBracket::Over110k);
        assert_eq!(view.gap(), Some(-1500.0));
        assert_eq!(view.true_annual_cost(), -700.0);
        assert_eq!(view.four_year_true_cost(), -2800.0);
        assert_eq!(view.severity, GapSeverity::MoneyBack);
        assert_eq!(view.color, SeverityColor::Low);
    }

    #[test]
    fn test_gap_table_marks_selected_bracket() {
        let table = Assessor::default().gap_table(&school_with_gaps(), IncomeBracket::From48kTo75k);
        assert_eq!(table.len(), 5);
        let selected: Vec<_> = table.iter().filter(|row| row.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].bracket, IncomeBracket::From48kTo75k);
        assert_eq!(table[3].gap, None);
        assert_eq!(table[3].severity, GapSeverity::Unknown);
        assert_eq!(table[4].four_year_gap, Some(2000.0));
    }

    #[test]
    fn test_report_carries_grant_aid_and_plan() {
        let school = School {
            cost_of_attendance: Some(60000.0),
            gap_0_30k: Some(4000.0),
            annual_travel_cost: Some(1000.0),
            ..school_with_gaps()
        };
        let report = Assessor::default().report(&school, IncomeBracket::Under30k);
        assert_eq!(report.estimated_grant_aid, Some(56000.0));
        assert_eq!(report.money_back_note, None);
        assert!(report.action_plan.contains("$20,000"));
        assert_eq!(report.gap_table.len(), 5);
    }
}
