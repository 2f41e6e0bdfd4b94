//! End-to-end affordability scenarios through the public library API.

mod common;

use common::school;
use gapmap::affordability::{Assessor, GapSeverity, SeverityColor};
use gapmap::compare::{AddOutcome, CompareList, FileKvStore};
use gapmap::core::{IncomeBracket, School, SeverityTag};
use gapmap::data::{LocalStore, SchoolQuery, SchoolStore, SearchCriteria};
use gapmap::formatting::format_signed_money;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_free_school_with_strong_pell_outcomes() {
    let free = School {
        gap_0_30k: Some(0.0),
        annual_travel_cost: Some(1200.0),
        no_loan_policy: true,
        grad_rate_4yr: Some(0.85),
        grad_rate_pell: Some(0.82),
        ..school("1", "Free Tech")
    };

    let view = Assessor::default().cost_view(&free, IncomeBracket::Under30k);

    assert_eq!(view.gap(), Some(0.0));
    assert_eq!(view.true_annual_cost(), 1200.0);
    assert_eq!(view.severity, GapSeverity::Free);
    assert!(view.narrative.contains("essentially free"));
    assert!(view.narrative.contains("no-loan policy"));
    assert!(view
        .narrative
        .contains("Low-income students thrive here: 82% of Pell Grant recipients"));
    assert!(!view.narrative.contains("equity gap"));
}

#[test]
fn test_money_back_school_ignores_stale_tag() {
    let generous = School {
        gap_110k_plus: Some(-1500.0),
        annual_travel_cost: Some(800.0),
        gap_severity: Some(SeverityTag::Critical),
        ..school("2", "Generous College")
    };

    let view = Assessor::default().cost_view(&generous, IncomeBracket::Over110k);

    assert_eq!(view.gap(), Some(-1500.0));
    assert_eq!(view.true_annual_cost(), -700.0);
    assert_eq!(view.four_year_true_cost(), -2800.0);
    assert_eq!(view.severity, GapSeverity::MoneyBack);
    assert_eq!(view.color, SeverityColor::Low);
    assert_eq!(format_signed_money(view.gap()), "+$1,500");
    assert_eq!(format_signed_money(Some(view.true_annual_cost())), "+$700");
}

#[test]
fn test_fifth_compare_add_leaves_list_unchanged() {
    let temp = TempDir::new().unwrap();
    let state = temp.path().join("state.json");
    let list = CompareList::new(FileKvStore::new(&state));

    for id in ["10", "20", "30", "40"] {
        assert_eq!(list.add(id).unwrap(), AddOutcome::Added);
    }
    assert_eq!(list.add("50").unwrap(), AddOutcome::CapacityExceeded);

    // A fresh handle sees exactly what was persisted
    let reopened = CompareList::new(FileKvStore::new(&state));
    assert_eq!(reopened.ids().unwrap(), vec!["10", "20", "30", "40"]);
}

#[test]
fn test_unreported_bracket_gap_is_unknown_not_zero() {
    let assessor = Assessor::default();
    let missing = school("5", "Unknown Gap College");
    let view = assessor.cost_view(&missing, IncomeBracket::From48kTo75k);

    assert_eq!(view.gap(), None);
    assert_eq!(view.severity, GapSeverity::Unknown);
    assert_eq!(view.true_annual_cost(), 0.0);
    assert!(view.narrative.contains("$48,001 - $75,000"));
}

#[test]
fn test_search_over_local_dataset_orders_by_gap() {
    let store = LocalStore::from_schools(common::sample_schools());
    let criteria = SearchCriteria {
        bracket: IncomeBracket::Under30k,
        max_gap: Some(9000.0),
        ..Default::default()
    };

    let found = store
        .fetch(&SchoolQuery::affordability_search(&criteria, 100))
        .unwrap();
    let ids: Vec<&str> = found.iter().map(|s| s.id.as_str()).collect();

    assert_eq!(ids, vec!["2", "1", "4", "6"]);
}

#[test]
fn test_report_gap_table_marks_selected_bracket() {
    let generous = common::sample_schools().remove(1);
    let report = Assessor::default().report(&generous, IncomeBracket::Over110k);

    let selected: Vec<IncomeBracket> = report
        .gap_table
        .iter()
        .filter(|row| row.selected)
        .map(|row| row.bracket)
        .collect();
    assert_eq!(selected, vec![IncomeBracket::Over110k]);
    assert_eq!(report.gap_table.len(), IncomeBracket::ALL.len());
    assert!(report.money_back_note.is_some());
}
