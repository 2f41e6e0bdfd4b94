use serde::Serialize;

use super::view::{BracketRow, CostView};
use crate::core::{School, TravelMode};
use crate::formatting::{format_money, normalize_url};

/// Everything the detail view shows for one school at one bracket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchoolReport {
    pub id: String,
    pub name: String,
    pub location: String,
    pub control: &'static str,
    pub enrollment: Option<f64>,
    pub no_loan_policy: bool,
    pub meets_full_need: bool,
    pub cost_of_attendance: Option<f64>,
    pub estimated_grant_aid: Option<f64>,
    pub cost: CostView,
    /// Present only when the gap is negative
    pub money_back_note: Option<String>,
    pub gap_table: Vec<BracketRow>,
    pub admissions: Admissions,
    pub outcomes: Outcomes,
    pub travel: TravelInfo,
    pub links: Links,
    pub action_plan: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Admissions {
    pub admission_rate: Option<f64>,
    /// Composite reading + math middle-50% range
    pub sat_range: Option<(f64, f64)>,
    pub act_range: Option<(f64, f64)>,
}

impl Admissions {
    pub fn from_school(school: &School) -> Self {
        Self {
            admission_rate: school.admission_rate,
            sat_range: school.sat_range(),
            act_range: school.act_range(),
        }
    }

    /// Whether there is anything beyond "not reported" to show
    pub fn is_reported(&self) -> bool {
        self.admission_rate.is_some() || self.sat_range.is_some() || self.act_range.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcomes {
    pub grad_rate_4yr: Option<f64>,
    pub grad_rate_pell: Option<f64>,
    pub median_debt: Option<f64>,
    pub median_earnings_10yr: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelInfo {
    pub mode: Option<TravelMode>,
    pub annual_cost: Option<f64>,
}

/// Outbound links, already normalized to carry a scheme
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Links {
    pub net_price_calculator: Option<String>,
    pub website: Option<String>,
}

impl Links {
    pub fn from_school(school: &School) -> Self {
        Self {
            net_price_calculator: school.npc_url.as_deref().map(normalize_url),
            website: school.website_url.as_deref().map(normalize_url),
        }
    }
}

pub(crate) fn money_back_note(gap: Option<f64>) -> Option<String> {
    match gap {
        Some(g) if g < 0.0 => Some(format!(
            "Good news! At your income level, this school provides more aid than the cost of attendance. \
             The extra {} can help cover personal expenses, transportation, or other costs.",
            format_money(Some(g.abs()))
        )),
        _ => None,
    }
}

pub(crate) fn action_plan(gap: Option<f64>, four_year_true_cost: f64) -> String {
    match gap {
        Some(g) if g <= 0.0 => "Great news: this school may cost you nothing or even provide extra funds. \
             A small savings cushion still helps with unexpected expenses."
            .to_string(),
        _ => format!(
            "You'll need to cover about {} over 4 years. Options include savings, work-study jobs, \
             payment plans, or carefully considered loans as a last resort.",
            format_money(Some(four_year_true_cost))
        ),
    }
}

impl SchoolReport {
    pub(crate) fn assemble(
        school: &School,
        cost: CostView,
        gap_table: Vec<BracketRow>,
        estimated_grant_aid: Option<f64>,
    ) -> Self {
        let gap = cost.gap();
        Self {
            id: school.id.clone(),
            name: school.name.clone(),
            location: school.location(),
            control: school.control_label(),
            enrollment: school.size,
            no_loan_policy: school.no_loan_policy,
            meets_full_need: school.meets_full_need,
            cost_of_attendance: school.cost_of_attendance,
            estimated_grant_aid,
            money_back_note: money_back_note(gap),
            action_plan: action_plan(gap, cost.four_year_true_cost()),
            cost,
            gap_table,
            admissions: Admissions::from_school(school),
            outcomes: Outcomes {
                grad_rate_4yr: school.grad_rate_4yr,
                grad_rate_pell: school.grad_rate_pell,
                median_debt: school.median_debt,
                median_earnings_10yr: school.median_earnings_10yr,
            },
            travel: TravelInfo {
                mode: school.travel_type,
                annual_cost: school.annual_travel_cost,
            },
            links: Links::from_school(school),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_back_note_only_for_negative_gap() {
        let note = money_back_note(Some(-1500.0)).unwrap();
        assert!(note.starts_with("Good news!"));
        assert!(note.contains("The extra $1,500"));
        assert_eq!(money_back_note(Some(0.0)), None);
        assert_eq!(money_back_note(None), None);
    }

    #[test]
    fn test_action_plan_variants() {
        assert!(action_plan(Some(0.0), 4800.0).starts_with("Great news"));
        assert!(action_plan(Some(-10.0), -2800.0).starts_with("Great news"));
        assert!(action_plan(Some(5000.0), 22400.0).contains("about $22,400 over 4 years"));
        assert!(action_plan(None, 10000.0).contains("$10,000"));
    }

    #[test]
    fn test_links_are_normalized() {
        let school = School {
            npc_url: Some("npc.lehigh.edu/calc".into()),
            website_url: Some("http://www.lehigh.edu".into()),
            ..Default::default()
        };
        let links = Links::from_school(&school);
        assert_eq!(
            links.net_price_calculator.as_deref(),
            Some("https://npc.lehigh.edu/calc")
        );
        assert_eq!(links.website.as_deref(), Some("http://www.lehigh.edu"));
    }

    #[test]
    fn test_admissions_not_reported() {
        let admissions = Admissions::from_school(&School::default());
        assert!(!admissions.is_reported());
    }
}
