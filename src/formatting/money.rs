//! Display helpers for nullable money, percent and count values.
//!
//! Absent values render as `N/A` everywhere; zero is a real value and renders
//! as `$0` / `0%`.

/// Display text for a value that was not reported
pub const NOT_AVAILABLE: &str = "N/A";

/// Insert `,` thousands separators into a whole number.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn whole_dollars(amount: f64) -> u64 {
    amount.abs().round() as u64
}

/// `$12,345`, `-$1,500`, or `N/A`. Amounts are rounded to whole dollars.
pub fn format_money(amount: Option<f64>) -> String {
    match amount {
        None => NOT_AVAILABLE.to_string(),
        Some(value) if value < 0.0 && whole_dollars(value) > 0 => {
            format!("-${}", group_thousands(whole_dollars(value)))
        }
        Some(value) => format!("${}", group_thousands(whole_dollars(value))),
    }
}

/// Like [`format_money`], but money back (a negative amount) is shown as the
/// absolute value with a leading plus: `+$1,500`.
pub fn format_signed_money(amount: Option<f64>) -> String {
    match amount {
        Some(value) if value < 0.0 => format!("+{}", format_money(Some(value.abs()))),
        other => format_money(other),
    }
}

/// Fraction to whole percent: `0.824` becomes `82%`.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(fraction) => format!("{}%", (fraction * 100.0).round() as i64),
    }
}

/// Whole number with thousands separators, e.g. enrollment.
pub fn format_count(value: Option<f64>) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(count) if count < 0.0 => format!("-{}", group_thousands(count.abs().round() as u64)),
        Some(count) => group_thousands(count.round() as u64),
    }
}

/// Prefix `https://` onto links stored without a scheme.
///
/// Values that already start with `http` (including `https`) are returned
/// unchanged apart from surrounding whitespace.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}
