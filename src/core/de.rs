//! Lenient field decoders for College Scorecard derived datasets.
//!
//! Exports of the Scorecard data are inconsistent about types: numbers show up
//! as JSON numbers or as strings, missing values as `null`, `""`, `"NULL"` or
//! `"PrivacySuppressed"`. Every decoder here maps those to `None` so that one
//! odd cell never rejects the whole dataset.

use serde::{Deserialize, Deserializer};

/// Cell values the Scorecard uses for "not reported".
const NOT_REPORTED: &[&str] = &["NULL", "PrivacySuppressed", "NA", "PS", ""];

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCell {
    Number(f64),
    Text(String),
    Flag(bool),
}

fn is_not_reported(value: &str) -> bool {
    NOT_REPORTED.contains(&value.trim())
}

/// Decode a nullable number; numeric strings are accepted.
pub fn nullable_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCell>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawCell::Number(n)) if n.is_finite() => Some(n),
        Some(RawCell::Text(text)) if !is_not_reported(&text) => {
            text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    })
}

/// Decode a nullable integer code such as `control`.
pub fn nullable_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(nullable_number(deserializer)?
        .filter(|n| n.fract() == 0.0)
        .map(|n| n as i64))
}

/// Decode a nullable string, dropping empty and sentinel values.
pub fn nullable_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCell>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawCell::Text(text)) if !is_not_reported(&text) => Some(text.trim().to_string()),
        Some(RawCell::Number(n)) => Some(format_number_id(n)),
        _ => None,
    })
}

/// Decode a boolean flag. Missing or unrecognised values are `false`.
pub fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCell>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawCell::Flag(flag)) => flag,
        Some(RawCell::Number(n)) => n == 1.0,
        Some(RawCell::Text(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "t" | "yes" | "y" | "1"
        ),
        None => false,
    })
}

/// Decode an identifier that may be stored as a string or a number.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match RawCell::deserialize(deserializer)? {
        RawCell::Text(text) => Ok(text.trim().to_string()),
        RawCell::Number(n) => Ok(format_number_id(n)),
        RawCell::Flag(flag) => Err(serde::de::Error::custom(format!(
            "expected a string or number id, found {}",
            flag
        ))),
    }
}

fn format_number_id(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
