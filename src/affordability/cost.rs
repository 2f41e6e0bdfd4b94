//! Cost composition: gap plus travel, and the four-year projection.
//!
//! An unreported gap or travel cost counts as zero inside the composed totals
//! but stays `None` in any standalone gap figure. Negative gaps (money back)
//! are never clamped.

use serde::Serialize;

/// Length of the degree used for projections
pub const YEARS: f64 = 4.0;

/// `gap + travel` with unreported values treated as zero
pub fn true_annual_cost(gap: Option<f64>, travel: Option<f64>) -> f64 {
    gap.unwrap_or(0.0) + travel.unwrap_or(0.0)
}

/// Four-year gap; `None` exactly when the gap is unreported
pub fn four_year_gap(gap: Option<f64>) -> Option<f64> {
    gap.map(|g| g * YEARS)
}

/// Four-year travel budget; unreported travel counts as zero
pub fn four_year_travel(travel: Option<f64>) -> f64 {
    travel.unwrap_or(0.0) * YEARS
}

pub fn four_year_true_cost(gap: Option<f64>, travel: Option<f64>) -> f64 {
    true_annual_cost(gap, travel) * YEARS
}

/// Grant aid implied by the published cost and the gap.
///
/// Only reported when both figures exist and the cost of attendance is
/// non-zero.
pub fn estimated_grant_aid(cost_of_attendance: Option<f64>, gap: Option<f64>) -> Option<f64> {
    match (cost_of_attendance, gap) {
        (Some(coa), Some(gap)) if coa != 0.0 => Some(coa - gap),
        _ => None,
    }
}

/// All cost figures for one school at one bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub gap: Option<f64>,
    pub annual_travel_cost: Option<f64>,
    pub true_annual_cost: f64,
    pub four_year_gap: Option<f64>,
    pub four_year_travel: f64,
    pub four_year_true_cost: f64,
}

impl CostBreakdown {
    pub fn compose(gap: Option<f64>, annual_travel_cost: Option<f64>) -> Self {
        Self {
            gap,
            annual_travel_cost,
            true_annual_cost: true_annual_cost(gap, annual_travel_cost),
            four_year_gap: four_year_gap(gap),
            four_year_travel: four_year_travel(annual_travel_cost),
            four_year_true_cost: four_year_true_cost(gap, annual_travel_cost),
        }
    }

    pub fn is_money_back(&self) -> bool {
        matches!(self.gap, Some(g) if g < 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_true_annual_cost_treats_null_as_zero() {
        assert_eq!(true_annual_cost(None, Some(500.0)), 500.0);
        assert_eq!(true_annual_cost(Some(-200.0), Some(500.0)), 300.0);
        assert_eq!(true_annual_cost(Some(1200.0), None), 1200.0);
        assert_eq!(true_annual_cost(None, None), 0.0);
    }

    #[test]
    fn test_four_year_gap_preserves_null_and_sign() {
        assert_eq!(four_year_gap(None), None);
        assert_eq!(four_year_gap(Some(-100.0)), Some(-400.0));
        assert_eq!(four_year_gap(Some(0.0)), Some(0.0));
    }

    #[test]
    fn test_money_back_breakdown() {
        let breakdown = CostBreakdown::compose(Some(-1500.0), Some(800.0));
        assert_eq!(breakdown.true_annual_cost, -700.0);
        assert_eq!(breakdown.four_year_true_cost, -2800.0);
        assert_eq!(breakdown.four_year_gap, Some(-6000.0));
        assert_eq!(breakdown.four_year_travel, 3200.0);
        assert!(breakdown.is_money_back());
    }

    #[test]
    fn test_unreported_gap_keeps_travel_in_total() {
        let breakdown = CostBreakdown::compose(None, Some(2500.0));
        assert_eq!(breakdown.four_year_gap, None);
        assert_eq!(breakdown.true_annual_cost, 2500.0);
        assert_eq!(breakdown.four_year_travel, 10000.0);
        assert!(!breakdown.is_money_back());

        let no_travel = CostBreakdown::compose(Some(100.0), None);
        assert_eq!(no_travel.four_year_travel, 0.0);
        assert_eq!(no_travel.four_year_true_cost, 400.0);
    }

    #[test]
    fn test_estimated_grant_aid() {
        assert_eq!(estimated_grant_aid(Some(80000.0), Some(5000.0)), Some(75000.0));
        assert_eq!(estimated_grant_aid(Some(30000.0), Some(-1500.0)), Some(31500.0));
        assert_eq!(estimated_grant_aid(Some(0.0), Some(5000.0)), None);
        assert_eq!(estimated_grant_aid(None, Some(5000.0)), None);
        assert_eq!(estimated_grant_aid(Some(80000.0), None), None);
    }

    proptest! {
        #[test]
        fn prop_four_year_gap_is_none_iff_gap_is_none(gap in proptest::option::of(-50_000i32..100_000)) {
            let gap = gap.map(f64::from);
            let projected = four_year_gap(gap);
            prop_assert_eq!(projected.is_none(), gap.is_none());
            if let (Some(g), Some(p)) = (gap, projected) {
                prop_assert_eq!(p, g * 4.0);
            }
        }

        #[test]
        fn prop_total_is_four_times_annual(
            gap in proptest::option::of(-50_000i32..100_000),
            travel in proptest::option::of(0i32..5_000),
        ) {
            let gap = gap.map(f64::from);
            let travel = travel.map(f64::from);
            let breakdown = CostBreakdown::compose(gap, travel);
            prop_assert_eq!(breakdown.four_year_true_cost, breakdown.true_annual_cost * 4.0);
            prop_assert_eq!(
                breakdown.true_annual_cost,
                gap.unwrap_or(0.0) + travel.unwrap_or(0.0)
            );
        }
    }
}
