use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::School;
use crate::errors::Error;

/// Family income range used to pick one precomputed gap value.
///
/// The enum is closed: every bracket maps to exactly one gap column through
/// the exhaustive matches below, so adding a bracket is a compile error until
/// each mapping handles it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum IncomeBracket {
    #[default]
    #[serde(rename = "0-30k")]
    Under30k,
    #[serde(rename = "30-48k")]
    From30kTo48k,
    #[serde(rename = "48-75k")]
    From48kTo75k,
    #[serde(rename = "75-110k")]
    From75kTo110k,
    #[serde(rename = "110k+")]
    Over110k,
}

impl IncomeBracket {
    /// All brackets, lowest income first.
    pub const ALL: [IncomeBracket; 5] = [
        IncomeBracket::Under30k,
        IncomeBracket::From30kTo48k,
        IncomeBracket::From48kTo75k,
        IncomeBracket::From75kTo110k,
        IncomeBracket::Over110k,
    ];

    /// Stable key used on the command line and in JSON output
    pub fn key(&self) -> &'static str {
        match self {
            IncomeBracket::Under30k => "0-30k",
            IncomeBracket::From30kTo48k => "30-48k",
            IncomeBracket::From48kTo75k => "48-75k",
            IncomeBracket::From75kTo110k => "75-110k",
            IncomeBracket::Over110k => "110k+",
        }
    }

    /// Human readable income range
    pub fn label(&self) -> &'static str {
        match self {
            IncomeBracket::Under30k => "$0 - $30,000",
            IncomeBracket::From30kTo48k => "$30,001 - $48,000",
            IncomeBracket::From48kTo75k => "$48,001 - $75,000",
            IncomeBracket::From75kTo110k => "$75,001 - $110,000",
            IncomeBracket::Over110k => "$110,001+",
        }
    }

    /// Dataset column holding this bracket's gap
    pub fn column_name(&self) -> &'static str {
        match self {
            IncomeBracket::Under30k => "gap_0_30k",
            IncomeBracket::From30kTo48k => "gap_30_48k",
            IncomeBracket::From48kTo75k => "gap_48_75k",
            IncomeBracket::From75kTo110k => "gap_75_110k",
            IncomeBracket::Over110k => "gap_110k_plus",
        }
    }

    /// The gap this bracket selects on a school record.
    ///
    /// Only the bracket's dedicated field is read; the other four are
    /// irrelevant to the result.
    pub fn gap_of(&self, school: &School) -> Option<f64> {
        match self {
            IncomeBracket::Under30k => school.gap_0_30k,
            IncomeBracket::From30kTo48k => school.gap_30_48k,
            IncomeBracket::From48kTo75k => school.gap_48_75k,
            IncomeBracket::From75kTo110k => school.gap_75_110k,
            IncomeBracket::Over110k => school.gap_110k_plus,
        }
    }
}

impl fmt::Display for IncomeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for IncomeBracket {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        IncomeBracket::ALL
            .into_iter()
            .find(|bracket| bracket.key() == normalized)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "unknown income bracket '{}' (expected one of: {})",
                    s,
                    IncomeBracket::ALL.map(|b| b.key()).join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_keys_round_trip_through_display() {
        for bracket in IncomeBracket::ALL {
            let parsed: IncomeBracket = bracket.to_string().parse().unwrap();
            assert_eq!(parsed, bracket);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(
            " 110K+ ".parse::<IncomeBracket>().unwrap(),
            IncomeBracket::Over110k
        );
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let err = "30-50k".parse::<IncomeBracket>().unwrap_err();
        assert!(err.to_string().contains("30-50k"));
        assert!(err.to_string().contains("0-30k"));
    }

    #[test]
    fn test_serde_uses_bracket_keys() {
        let json = serde_json::to_string(&IncomeBracket::From75kTo110k).unwrap();
        assert_eq!(json, "\"75-110k\"");
        let back: IncomeBracket = serde_json::from_str("\"48-75k\"").unwrap();
        assert_eq!(back, IncomeBracket::From48kTo75k);
    }

    #[test]
    fn test_default_is_lowest_bracket() {
        assert_eq!(IncomeBracket::default(), IncomeBracket::Under30k);
    }

    #[test]
    fn test_column_names_are_distinct() {
        let mut columns: Vec<_> = IncomeBracket::ALL.iter().map(|b| b.column_name()).collect();
        columns.sort_unstable();
        columns.dedup();
        assert_eq!(columns.len(), 5);
    }
}
