//! Replaces one activity's performed hours with the cycling time recorded on Strava.

use crate::auth::StravaAuth;
use crate::config::StravaConfig;
use crate::errors::PortfolioError;
use crate::models::{ActivityRecord, HoursValue, StravaActivity, VeloHours};
use crate::stats::{calculate_stats_from_activities, format_distance, is_ride, rounded_hours};
use crate::strava::StravaClient;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{info, warn};

const RECENT_RIDES: usize = 5;

#[derive(Debug)]
pub enum EnrichOutcome {
    /// Strava is not configured; static values are kept.
    Skipped,
    Applied(VeloHours),
    /// The remote path failed; static values are kept.
    Fallback(PortfolioError),
}

impl EnrichOutcome {
    pub fn velo_hours(&self) -> Option<&VeloHours> {
        match self {
            EnrichOutcome::Applied(hours) => Some(hours),
            _ => None,
        }
    }
}

pub struct Enricher {
    client: Client,
    auth: StravaAuth,
    config: StravaConfig,
    since: NaiveDate,
    target: String,
}

impl Enricher {
    pub fn new(client: Client, config: StravaConfig, since: NaiveDate, target: impl Into<String>) -> Self {
        Self {
            auth: StravaAuth::new(client.clone(), &config),
            client,
            config,
            since,
            target: target.into(),
        }
    }

    pub async fn velo_hours(&self, until: NaiveDate) -> Result<VeloHours, PortfolioError> {
        let token = self.auth.get_valid_access_token().await?;
        let strava = StravaClient::new(
            self.client.clone(),
            self.config.api_base.clone(),
            token,
            self.config.athlete_id.clone(),
        );

        let activities = strava.get_all_activities_in_range(self.since, until).await?;
        let stats = calculate_stats_from_activities(&activities);
        let hours = rounded_hours(stats.moving_time);

        info!(
            hours,
            distance_km = %format_distance(stats.distance),
            rides = stats.count,
            activities = activities.len(),
            since = %self.since,
            "cycling hours computed from strava"
        );

        Ok(VeloHours {
            hours,
            distance: stats.distance,
            activities: activities.len(),
            stats,
            recent: recent_rides(&activities),
        })
    }
}

/// Runs the enrichment when configured and folds every failure into
/// [`EnrichOutcome::Fallback`], leaving `records` untouched in that case.
pub async fn enrich_records(
    enricher: Option<&Enricher>,
    records: &mut [ActivityRecord],
    today: NaiveDate,
) -> EnrichOutcome {
    let Some(enricher) = enricher else {
        info!("strava not configured, cycling hours come from the data file");
        return EnrichOutcome::Skipped;
    };

    match enricher.velo_hours(today).await {
        Ok(velo) => {
            if !apply_velo_hours(records, &enricher.target, velo.hours) {
                warn!(activity = %enricher.target, "no activity matches the enrichment target");
            }
            EnrichOutcome::Applied(velo)
        }
        Err(err) => {
            if err.is_unauthorized() {
                warn!(
                    "strava authentication failed: check the refresh token, the activity:read_all scope and that access was not revoked"
                );
            }
            warn!(error = %err, "strava enrichment failed, using data file hours");
            EnrichOutcome::Fallback(err)
        }
    }
}

/// Overwrites `heures_prestees` of the first activity named `target`
/// (case-insensitive). Returns whether a row was updated.
pub fn apply_velo_hours(records: &mut [ActivityRecord], target: &str, hours: i64) -> bool {
    let target = target.to_lowercase();
    match records
        .iter_mut()
        .find(|record| record.nom.to_lowercase() == target)
    {
        Some(record) => {
            record.heures_prestees = Some(HoursValue::Text(format!("~{hours}h")));
            true
        }
        None => false,
    }
}

fn recent_rides(activities: &[StravaActivity]) -> Vec<StravaActivity> {
    let mut rides: Vec<StravaActivity> = activities.iter().filter(|a| is_ride(a)).cloned().collect();
    rides.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    rides.truncate(RECENT_RIDES);
    rides
}
