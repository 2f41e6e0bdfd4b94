//! Plain-language summary of what a school means for one family.
//!
//! The narrative is an ordered table of independent rules. Each rule looks at
//! the [`NarrativeContext`] and either contributes one sentence or nothing;
//! the fired sentences are joined with single spaces. There is no randomness,
//! so identical inputs always produce identical text.

use serde::Serialize;

use super::severity::{classify, GapSeverity};
use crate::config::{NarrativeConfig, SeverityThresholds};
use crate::core::{IncomeBracket, School, TravelMode};
use crate::formatting::{format_money, format_percent};

/// Everything a narrative rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeContext<'a> {
    pub school: &'a School,
    pub gap: Option<f64>,
    pub bracket: IncomeBracket,
    pub thresholds: &'a SeverityThresholds,
    pub config: &'a NarrativeConfig,
    /// Home region named in travel sentences
    pub origin: &'a str,
}

impl<'a> NarrativeContext<'a> {
    fn severity(&self) -> GapSeverity {
        classify(self.gap, self.thresholds)
    }

    /// Both graduation rates as percentages, when both are reported
    fn grad_rates(&self) -> Option<(f64, f64)> {
        Some((
            to_percent(self.school.grad_rate_4yr?),
            to_percent(self.school.grad_rate_pell?),
        ))
    }
}

/// Signature shared by every narrative rule
pub type Rule = fn(&NarrativeContext) -> Option<String>;

/// Rules in the order their sentences appear.
pub const RULES: &[(&str, Rule)] = &[
    ("cost_tier", cost_tier_sentence),
    ("no_loan", no_loan_sentence),
    ("outcomes", outcomes_sentence),
    ("equity_gap", equity_gap_sentence),
    ("travel", travel_sentence),
];

/// Generated narrative, one entry per fired rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub sentences: Vec<String>,
}

impl Narrative {
    pub fn text(&self) -> String {
        self.sentences.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

pub fn generate(context: &NarrativeContext) -> Narrative {
    let sentences = RULES
        .iter()
        .filter_map(|(name, rule)| {
            let sentence = rule(context);
            if sentence.is_some() {
                log::trace!("narrative rule '{}' fired for {}", name, context.school.id);
            }
            sentence
        })
        .collect();
    Narrative { sentences }
}

/// Fraction to percentage points, rounded to 4 decimal places so values like
/// `0.82` compare exactly against whole-number thresholds.
fn to_percent(fraction: f64) -> f64 {
    round4(fraction * 100.0)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

pub fn cost_tier_sentence(ctx: &NarrativeContext) -> Option<String> {
    let gap = ctx.gap;
    let amount = format_money(gap.map(f64::abs));
    let sentence = match ctx.severity() {
        GapSeverity::Unknown => format!(
            "We don't have gap data for families earning {}, so use the school's net price calculator for an estimate.",
            ctx.bracket.label()
        ),
        GapSeverity::MoneyBack => format!(
            "At your income level this school's aid exceeds the full cost of attendance, leaving about {} a year for other expenses.",
            amount
        ),
        GapSeverity::Free => {
            "At your income level this school is essentially free: grants cover the full cost of attendance.".to_string()
        }
        GapSeverity::VeryAffordable => format!(
            "This school is very affordable for your family, with a gap of about {} a year that summer work and savings can usually cover.",
            amount
        ),
        GapSeverity::Moderate => format!(
            "Your family would need to cover about {} a year, which is manageable with savings and work-study.",
            amount
        ),
        GapSeverity::Expensive => format!(
            "At about {} a year this school is expensive for your family, so compare it carefully with lower-cost options.",
            amount
        ),
        GapSeverity::VeryExpensive => format!(
            "At about {} a year this school is very expensive for your family, and gaps this large are a leading reason students borrow heavily or drop out before finishing.",
            amount
        ),
    };
    Some(sentence)
}

pub fn no_loan_sentence(ctx: &NarrativeContext) -> Option<String> {
    ctx.school.no_loan_policy.then(|| {
        "This school has a no-loan policy, so its aid packages are built from grants and work instead of loans.".to_string()
    })
}

pub fn outcomes_sentence(ctx: &NarrativeContext) -> Option<String> {
    let (_, pell) = ctx.grad_rates()?;
    let shown = format_percent(ctx.school.grad_rate_pell);
    let config = ctx.config;

    if pell >= config.excellent_pell_rate {
        Some(format!(
            "Low-income students thrive here: {} of Pell Grant recipients graduate within four years.",
            shown
        ))
    } else if pell >= config.solid_pell_rate {
        Some(format!(
            "Outcomes are solid, with {} of Pell Grant recipients graduating within four years.",
            shown
        ))
    } else if pell >= config.fair_pell_rate {
        Some(format!(
            "Only {} of Pell Grant recipients graduate within four years, so ask about advising and support programs.",
            shown
        ))
    } else if pell > 0.0 {
        Some(format!(
            "Be cautious: just {} of Pell Grant recipients graduate within four years.",
            shown
        ))
    } else {
        None
    }
}

/// Fires alongside the outcomes sentence when Pell students trail everyone
/// else by more than the configured number of points.
pub fn equity_gap_sentence(ctx: &NarrativeContext) -> Option<String> {
    outcomes_sentence(ctx)?;
    let (overall, pell) = ctx.grad_rates()?;
    let difference = round4(overall - pell);
    if difference <= ctx.config.equity_gap_points {
        return None;
    }
    Some(format!(
        "Watch the equity gap: Pell Grant recipients graduate at {} compared with {} overall, a difference of {} points.",
        format_percent(ctx.school.grad_rate_pell),
        format_percent(ctx.school.grad_rate_4yr),
        format_points(difference)
    ))
}

/// Whole points print bare; fractional points keep one decimal.
fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{}", points as i64)
    } else {
        format!("{:.1}", points)
    }
}

pub fn travel_sentence(ctx: &NarrativeContext) -> Option<String> {
    if ctx.school.travel_type != Some(TravelMode::Fly) {
        return None;
    }
    let travel = format_money(Some(ctx.school.annual_travel_cost?));
    let gap = ctx.gap?;

    if gap < 0.0 {
        Some(format!(
            "Flying home to {} adds about {} a year, but the extra aid more than covers it.",
            ctx.origin, travel
        ))
    } else if gap < ctx.config.good_deal_gap_max {
        Some(format!(
            "Even with about {} a year in flights home to {}, this school is still a good deal.",
            travel, ctx.origin
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Fixture {
        thresholds: SeverityThresholds,
        config: NarrativeConfig,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                thresholds: SeverityThresholds::default(),
                config: NarrativeConfig::default(),
            }
        }

        fn context<'a>(&'a self, school: &'a School, gap: Option<f64>) -> NarrativeContext<'a> {
            NarrativeContext {
                school,
                gap,
                bracket: IncomeBracket::Under30k,
                thresholds: &self.thresholds,
                config: &self.config,
                origin: "the Poconos",
            }
        }
    }

    fn school_with_rates(overall: f64, pell: f64) -> School {
        School {
            id: "1".into(),
            name: "Test College".into(),
            grad_rate_4yr: Some(overall),
            grad_rate_pell: Some(pell),
            ..Default::default()
        }
    }

    #[test]
    fn test_free_school_with_strong_outcomes() {
        let fixture = Fixture::new();
        let school = School {
            no_loan_policy: true,
            ..school_with_rates(0.85, 0.82)
        };
        let narrative = generate(&fixture.context(&school, Some(0.0)));

        assert_eq!(narrative.sentences.len(), 3);
        let text = narrative.text();
        assert!(text.contains("essentially free"));
        assert!(text.contains("no-loan policy"));
        assert!(text.contains("thrive here: 82%"));
        assert!(!text.contains("equity gap"));
    }

    #[test]
    fn test_sentences_joined_with_single_space() {
        let fixture = Fixture::new();
        let school = School {
            no_loan_policy: true,
            ..Default::default()
        };
        let narrative = generate(&fixture.context(&school, Some(0.0)));
        assert_eq!(
            narrative.text(),
            "At your income level this school is essentially free: grants cover the full cost of attendance. \
             This school has a no-loan policy, so its aid packages are built from grants and work instead of loans."
        );
    }

    #[test]
    fn test_very_expensive_mentions_dropout_risk() {
        let fixture = Fixture::new();
        let school = School::default();
        let sentence = cost_tier_sentence(&fixture.context(&school, Some(22000.0))).unwrap();
        assert!(sentence.contains("$22,000"));
        assert!(sentence.contains("drop out"));
    }

    #[test]
    fn test_unknown_gap_names_the_bracket() {
        let fixture = Fixture::new();
        let school = School::default();
        let sentence = cost_tier_sentence(&fixture.context(&school, None)).unwrap();
        assert!(sentence.contains("$0 - $30,000"));
    }

    #[test]
    fn test_pell_tiers() {
        let fixture = Fixture::new();
        let cases = [
            (0.80, "thrive"),
            (0.60, "solid"),
            (0.40, "advising"),
            (0.10, "Be cautious"),
        ];
        for (pell, expected) in cases {
            let school = school_with_rates(pell, pell);
            let sentence = outcomes_sentence(&fixture.context(&school, Some(0.0))).unwrap();
            assert!(sentence.contains(expected), "{} -> {}", pell, sentence);
        }
    }

    #[test]
    fn test_zero_or_missing_pell_rate_is_silent() {
        let fixture = Fixture::new();
        let zero = school_with_rates(0.5, 0.0);
        assert_eq!(outcomes_sentence(&fixture.context(&zero, Some(0.0))), None);
        assert_eq!(equity_gap_sentence(&fixture.context(&zero, Some(0.0))), None);

        let missing = School {
            grad_rate_4yr: Some(0.9),
            ..Default::default()
        };
        assert_eq!(outcomes_sentence(&fixture.context(&missing, Some(0.0))), None);
    }

    #[test]
    fn test_equity_gap_threshold_is_exclusive() {
        let fixture = Fixture::new();
        let at_threshold = school_with_rates(0.70, 0.55);
        assert_eq!(
            equity_gap_sentence(&fixture.context(&at_threshold, Some(0.0))),
            None
        );

        let above = school_with_rates(0.71, 0.55);
        let sentence = equity_gap_sentence(&fixture.context(&above, Some(0.0))).unwrap();
        assert_eq!(
            sentence,
            "Watch the equity gap: Pell Grant recipients graduate at 55% compared with 71% overall, a difference of 16 points."
        );
    }

    #[test]
    fn test_fractional_equity_gap_keeps_decimal() {
        let fixture = Fixture::new();
        let school = school_with_rates(0.854, 0.70);
        let sentence = equity_gap_sentence(&fixture.context(&school, Some(0.0))).unwrap();
        assert!(sentence.ends_with("a difference of 15.4 points."), "{}", sentence);
        assert_eq!(format_points(16.0), "16");
    }

    #[test]
    fn test_travel_sentence_variants() {
        let fixture = Fixture::new();
        let flyer = School {
            travel_type: Some(TravelMode::Fly),
            annual_travel_cost: Some(2500.0),
            ..Default::default()
        };

        let reassurance = travel_sentence(&fixture.context(&flyer, Some(-500.0))).unwrap();
        assert!(reassurance.contains("more than covers it"));

        let good_deal = travel_sentence(&fixture.context(&flyer, Some(0.0))).unwrap();
        assert!(good_deal.contains("still a good deal"));
        assert!(travel_sentence(&fixture.context(&flyer, Some(2999.0))).is_some());
        assert_eq!(travel_sentence(&fixture.context(&flyer, Some(3000.0))), None);
        assert_eq!(travel_sentence(&fixture.context(&flyer, None)), None);
    }

    #[test]
    fn test_travel_requires_fly_and_reported_cost() {
        let fixture = Fixture::new();
        let driver = School {
            travel_type: Some(TravelMode::Drive),
            annual_travel_cost: Some(600.0),
            ..Default::default()
        };
        assert_eq!(travel_sentence(&fixture.context(&driver, Some(-500.0))), None);

        let unpriced = School {
            travel_type: Some(TravelMode::Fly),
            ..Default::default()
        };
        assert_eq!(travel_sentence(&fixture.context(&unpriced, Some(-500.0))), None);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let fixture = Fixture::new();
        let school = School {
            travel_type: Some(TravelMode::Fly),
            annual_travel_cost: Some(2500.0),
            ..school_with_rates(0.9, 0.5)
        };
        let first = generate(&fixture.context(&school, Some(1200.0)));
        let second = generate(&fixture.context(&school, Some(1200.0)));
        assert_eq!(first, second);
        assert_eq!(first.sentences.len(), 4);
    }
}
