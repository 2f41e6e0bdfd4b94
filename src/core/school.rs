use serde::{Deserialize, Deserializer, Serialize};

use super::de;

/// How a student is expected to get home from school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TravelMode {
    Drive,
    Fly,
}

impl TravelMode {
    pub fn label(&self) -> &'static str {
        match self {
            TravelMode::Drive => "Drive",
            TravelMode::Fly => "Fly",
        }
    }

    fn parse_lenient(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DRIVE" => Some(TravelMode::Drive),
            "FLY" => Some(TravelMode::Fly),
            _ => None,
        }
    }
}

/// Coarse severity tag precomputed by the data pipeline.
///
/// The tag is computed for one bracket at export time and can be stale for
/// the bracket a family actually selects; see
/// [`resolve_color`](crate::affordability::severity::resolve_color) for how
/// it is reconciled with the live gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTag {
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityTag {
    fn parse_lenient(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(SeverityTag::Low),
            "medium" => Some(SeverityTag::Medium),
            "high" => Some(SeverityTag::High),
            "critical" => Some(SeverityTag::Critical),
            _ => None,
        }
    }
}

fn lenient_travel_mode<'de, D>(deserializer: D) -> Result<Option<TravelMode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de::nullable_text(deserializer)?.and_then(|v| TravelMode::parse_lenient(&v)))
}

fn lenient_severity_tag<'de, D>(deserializer: D) -> Result<Option<SeverityTag>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de::nullable_text(deserializer)?.and_then(|v| SeverityTag::parse_lenient(&v)))
}

/// One school record as exported by the data pipeline.
///
/// Every numeric field is optional: `None` means "not reported" and must be
/// shown as `N/A`, never treated as zero. Records are read-only to gapmap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct School {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "de::nullable_text")]
    pub unitid: Option<String>,
    pub name: String,
    #[serde(default, deserialize_with = "de::nullable_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "de::nullable_text")]
    pub state: Option<String>,
    /// Scorecard control code: 1 public, 2 private nonprofit, 3 for-profit
    #[serde(default, deserialize_with = "de::nullable_integer")]
    pub control: Option<i64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub size: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_text")]
    pub website_url: Option<String>,
    #[serde(default, deserialize_with = "de::nullable_text")]
    pub npc_url: Option<String>,

    #[serde(default, deserialize_with = "de::nullable_number")]
    pub cost_of_attendance: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub tuition_in_state: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub tuition_out_state: Option<f64>,
    #[serde(default, deserialize_with = "de::lenient_flag")]
    pub no_loan_policy: bool,
    #[serde(default, deserialize_with = "de::lenient_flag")]
    pub meets_full_need: bool,

    #[serde(default, deserialize_with = "lenient_travel_mode")]
    pub travel_type: Option<TravelMode>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub annual_travel_cost: Option<f64>,

    #[serde(default, deserialize_with = "de::nullable_number")]
    pub gap_0_30k: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub gap_30_48k: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub gap_48_75k: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub gap_75_110k: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub gap_110k_plus: Option<f64>,
    #[serde(default, deserialize_with = "lenient_severity_tag")]
    pub gap_severity: Option<SeverityTag>,

    #[serde(default, deserialize_with = "de::nullable_number")]
    pub grad_rate_4yr: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub grad_rate_pell: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub median_debt: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub median_earnings_10yr: Option<f64>,

    #[serde(default, deserialize_with = "de::nullable_number")]
    pub admission_rate: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub sat_read_25: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub sat_read_75: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub sat_math_25: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub sat_math_75: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub act_25: Option<f64>,
    #[serde(default, deserialize_with = "de::nullable_number")]
    pub act_75: Option<f64>,
}

impl School {
    pub fn is_public(&self) -> bool {
        self.control == Some(1)
    }

    pub fn control_label(&self) -> &'static str {
        if self.is_public() {
            "Public"
        } else {
            "Private"
        }
    }

    /// "City, ST", degrading gracefully when either part is missing.
    pub fn location(&self) -> String {
        match (self.city.as_deref(), self.state.as_deref()) {
            (Some(city), Some(state)) => format!("{}, {}", city, state),
            (Some(city), None) => city.to_string(),
            (None, Some(state)) => state.to_string(),
            (None, None) => "N/A".to_string(),
        }
    }

    /// Composite SAT middle-50% range (reading + math).
    ///
    /// Only reported when all four percentile scores are present.
    pub fn sat_range(&self) -> Option<(f64, f64)> {
        Some((
            self.sat_read_25? + self.sat_math_25?,
            self.sat_read_75? + self.sat_math_75?,
        ))
    }

    pub fn act_range(&self) -> Option<(f64, f64)> {
        Some((self.act_25?, self.act_75?))
    }

    pub fn travel_label(&self) -> &'static str {
        self.travel_type.map(|m| m.label()).unwrap_or("N/A")
    }
}
