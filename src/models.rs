use serde::{Deserialize, Serialize};
use std::fmt;

/// Hour columns arrive either as display strings (`"~12h"`, `"3,5"`) or as bare numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HoursValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for HoursValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoursValue::Number(value) => write!(f, "{value}"),
            HoursValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for HoursValue {
    fn from(value: &str) -> Self {
        HoursValue::Text(value.to_string())
    }
}

impl From<f64> for HoursValue {
    fn from(value: f64) -> Self {
        HoursValue::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofRef {
    pub lien: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legende: Option<String>,
}

/// One portfolio entry from the static data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub nom: String,
    #[serde(default)]
    pub categorie: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub heures_prestees: Option<HoursValue>,
    #[serde(default)]
    pub heures_valorisees: Option<HoursValue>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub preuves: Vec<ProofRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub categorie: String,
    pub rows: Vec<ActivityRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_prestees: f64,
    pub total_valorisees: f64,
}

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub groups: Vec<CategoryGroup>,
    pub totals: Totals,
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub activity: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

/// A recorded workout as returned by the activity-list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StravaActivity {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub moving_time: Option<f64>,
    #[serde(default)]
    pub elapsed_time: Option<f64>,
    #[serde(default)]
    pub total_elevation_gain: Option<f64>,
    #[serde(default)]
    pub start_date: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CyclingStats {
    pub count: u64,
    pub distance: f64,
    pub moving_time: f64,
    pub elapsed_time: f64,
    pub elevation_gain: f64,
    pub total_elevation_gain: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RideTotals {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub moving_time: f64,
    #[serde(default)]
    pub elapsed_time: f64,
    #[serde(default)]
    pub elevation_gain: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AthleteStats {
    #[serde(default)]
    pub all_ride_totals: RideTotals,
    #[serde(default)]
    pub ytd_ride_totals: RideTotals,
    #[serde(default)]
    pub recent_ride_totals: RideTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub id: u64,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// Outcome of a successful cycling-hours enrichment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VeloHours {
    pub hours: i64,
    pub distance: f64,
    pub activities: usize,
    pub stats: CyclingStats,
    pub recent: Vec<StravaActivity>,
}
