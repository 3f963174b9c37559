use crate::errors::PortfolioError;
use crate::models::ActivityRecord;
use std::path::Path;
use tokio::fs;
use tracing::error;

/// Reads the static activity list. Unlike the enrichment path there is no
/// fallback: a missing or malformed file is a `Load` error.
pub async fn load_portfolio(path: &Path) -> Result<Vec<ActivityRecord>, PortfolioError> {
    let bytes = fs::read(path).await.map_err(|err| {
        error!("failed to read portfolio file {}: {err}", path.display());
        PortfolioError::load(format!("{}: {err}", path.display()))
    })?;

    serde_json::from_slice(&bytes).map_err(|err| {
        error!("failed to parse portfolio file {}: {err}", path.display());
        PortfolioError::load(format!("{}: {err}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HoursValue;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("portfolio_storage_{}_{name}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn loads_mixed_hour_types() {
        let path = temp_path("mixed");
        let json = r#"[
            {"nom": "Vélo", "categorie": "Sport", "heures_prestees": "~120h", "heures_valorisees": 30,
             "description": "Sorties", "preuves": [{"lien": "velo.jpg", "legende": "Col"}]},
            {"nom": "Scouts", "categorie": "Bénévolat", "date": "2022", "heures_valorisees": "40h",
             "description": "Animation", "preuves": []}
        ]"#;
        fs::write(&path, json).await.unwrap();

        let records = load_portfolio(&path).await.unwrap();
        let _ = fs::remove_file(&path).await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].heures_prestees, Some(HoursValue::from("~120h")));
        assert_eq!(records[0].heures_valorisees, Some(HoursValue::Number(30.0)));
        assert_eq!(records[0].preuves[0].legende.as_deref(), Some("Col"));
        assert_eq!(records[1].heures_prestees, None);
        assert_eq!(records[1].date.as_deref(), Some("2022"));
    }

    #[tokio::test]
    async fn missing_file_is_load_error() {
        let err = load_portfolio(&temp_path("missing")).await.unwrap_err();
        assert!(matches!(err, PortfolioError::Load(_)));
    }

    #[tokio::test]
    async fn malformed_entry_is_load_error() {
        let path = temp_path("malformed");
        fs::write(&path, r#"[{"categorie": "Sport"}]"#).await.unwrap();
        let err = load_portfolio(&path).await.unwrap_err();
        let _ = fs::remove_file(&path).await;
        assert!(matches!(err, PortfolioError::Load(_)));
    }
}
