use chrono::NaiveDate;
use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "DATA/tabPortfolio.json";
const DEFAULT_ASSET_DIR: &str = "IMG/preuve_portfolio";
const DEFAULT_ASSET_BASE: &str = "/IMG/preuve_portfolio";
const DEFAULT_API_BASE: &str = "https://www.strava.com/api/v3";
const DEFAULT_TOKEN_URL: &str = "https://www.strava.com/oauth/token";
const DEFAULT_ENRICH_ACTIVITY: &str = "vélo";

const PLACEHOLDERS: &[&str] = &[
    "YOUR_CLIENT_ID_HERE",
    "YOUR_CLIENT_SECRET_HERE",
    "YOUR_REFRESH_TOKEN_HERE",
    "YOUR_ATHLETE_ID_HERE",
];

#[derive(Clone, Debug)]
pub struct StravaConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub athlete_id: String,
    pub api_base: String,
    pub token_url: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub asset_dir: PathBuf,
    pub asset_base: String,
    pub strava: Option<StravaConfig>,
    pub since: NaiveDate,
    pub enrich_activity: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_port(lookup("PORT"), DEFAULT_PORT);
        let data_path = PathBuf::from(non_empty(lookup("PORTFOLIO_DATA_PATH")).unwrap_or_else(
            || DEFAULT_DATA_PATH.to_string(),
        ));
        let asset_dir = PathBuf::from(
            non_empty(lookup("PORTFOLIO_ASSET_DIR")).unwrap_or_else(|| DEFAULT_ASSET_DIR.to_string()),
        );
        let asset_base = non_empty(lookup("PORTFOLIO_ASSET_BASE"))
            .unwrap_or_else(|| DEFAULT_ASSET_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        let since = non_empty(lookup("STRAVA_SINCE"))
            .and_then(|raw| NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok())
            .unwrap_or_else(default_since);
        let enrich_activity = non_empty(lookup("ENRICH_ACTIVITY"))
            .unwrap_or_else(|| DEFAULT_ENRICH_ACTIVITY.to_string());

        Self {
            port,
            data_path,
            asset_dir,
            asset_base,
            strava: StravaConfig::from_lookup(&lookup),
            since,
            enrich_activity,
        }
    }
}

impl StravaConfig {
    /// Returns `None` when any credential is missing or still a placeholder;
    /// enrichment is skipped in that case.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let client_id = credential(lookup("STRAVA_CLIENT_ID"))?;
        let client_secret = credential(lookup("STRAVA_CLIENT_SECRET"))?;
        let refresh_token = credential(lookup("STRAVA_REFRESH_TOKEN"))?;
        let athlete_id = credential(lookup("STRAVA_ATHLETE_ID")).unwrap_or_default();
        let api_base = non_empty(lookup("STRAVA_API_BASE"))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        let token_url =
            non_empty(lookup("STRAVA_TOKEN_URL")).unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());

        Some(Self {
            client_id,
            client_secret,
            refresh_token,
            athlete_id,
            api_base,
            token_url,
        })
    }
}

fn default_since() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 9, 15).unwrap_or(NaiveDate::MIN)
}

fn credential(value: Option<String>) -> Option<String> {
    non_empty(value).filter(|raw| !PLACEHOLDERS.contains(&raw.as_str()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn parse_port(value: Option<String>, default_value: u16) -> u16 {
    value
        .as_deref()
        .and_then(|raw| raw.trim().parse::<u16>().ok())
        .filter(|parsed| *parsed > 0)
        .unwrap_or(default_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("DATA/tabPortfolio.json"));
        assert_eq!(config.asset_base, "/IMG/preuve_portfolio");
        assert_eq!(config.since, NaiveDate::from_ymd_opt(2023, 9, 15).unwrap());
        assert_eq!(config.enrich_activity, "vélo");
        assert!(config.strava.is_none());
    }

    #[test]
    fn strava_configured_when_all_credentials_present() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("STRAVA_CLIENT_ID", "123"),
            ("STRAVA_CLIENT_SECRET", "secret"),
            ("STRAVA_REFRESH_TOKEN", "refresh"),
            ("STRAVA_ATHLETE_ID", "42"),
            ("STRAVA_API_BASE", "http://127.0.0.1:9999/api/v3/"),
        ]));
        let strava = config.strava.expect("strava config");
        assert_eq!(strava.client_id, "123");
        assert_eq!(strava.athlete_id, "42");
        assert_eq!(strava.api_base, "http://127.0.0.1:9999/api/v3");
        assert_eq!(strava.token_url, "https://www.strava.com/oauth/token");
    }

    #[test]
    fn placeholder_secret_disables_strava() {
        let strava = StravaConfig::from_lookup(lookup_from(&[
            ("STRAVA_CLIENT_ID", "123"),
            ("STRAVA_CLIENT_SECRET", "YOUR_CLIENT_SECRET_HERE"),
            ("STRAVA_REFRESH_TOKEN", "refresh"),
        ]));
        assert!(strava.is_none());

        let strava = StravaConfig::from_lookup(lookup_from(&[
            ("STRAVA_CLIENT_ID", "123"),
            ("STRAVA_CLIENT_SECRET", "secret"),
            ("STRAVA_REFRESH_TOKEN", "YOUR_REFRESH_TOKEN_HERE"),
        ]));
        assert!(strava.is_none());
    }

    #[test]
    fn missing_credential_disables_strava() {
        let strava = StravaConfig::from_lookup(lookup_from(&[
            ("STRAVA_CLIENT_ID", "123"),
            ("STRAVA_REFRESH_TOKEN", "refresh"),
        ]));
        assert!(strava.is_none());
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "not-a-port"),
            ("STRAVA_SINCE", "15/09/2023"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.since, NaiveDate::from_ymd_opt(2023, 9, 15).unwrap());
    }
}
