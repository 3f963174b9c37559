use crate::config::AppConfig;
use crate::enrich::Enricher;
use reqwest::Client;
use std::{path::PathBuf, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub asset_base: String,
    pub enricher: Option<Arc<Enricher>>,
}

impl AppState {
    pub fn new(config: &AppConfig, client: Client) -> Self {
        let enricher = config.strava.clone().map(|strava| {
            Arc::new(Enricher::new(
                client,
                strava,
                config.since,
                config.enrich_activity.clone(),
            ))
        });

        Self {
            data_path: config.data_path.clone(),
            asset_base: config.asset_base.clone(),
            enricher,
        }
    }
}
