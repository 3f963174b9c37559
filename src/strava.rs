//! Bearer-authenticated client for the Strava v3 REST API.
//!
//! Page fetches are strictly sequential: each request waits for the previous
//! page before the next one is issued.

use crate::errors::PortfolioError;
use crate::models::{AthleteProfile, AthleteStats, StravaActivity};
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Largest page size the activity-list endpoint accepts.
pub const PAGE_SIZE: u32 = 200;
pub const DEFAULT_PER_PAGE: u32 = 30;
/// Upper bound on pages fetched for one date range (10 000 activities).
pub const MAX_PAGES: u32 = 50;

#[derive(Clone)]
pub struct StravaClient {
    client: Client,
    base_url: String,
    access_token: String,
    athlete_id: String,
    max_pages: u32,
}

impl StravaClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        athlete_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            athlete_id: athlete_id.into(),
            max_pages: MAX_PAGES,
        }
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub async fn get_athlete_stats(&self) -> Result<AthleteStats, PortfolioError> {
        let url = format!("{}/athletes/{}/stats", self.base_url, self.athlete_id);
        self.send_json(self.client.get(url)).await
    }

    pub async fn get_athlete_profile(&self) -> Result<AthleteProfile, PortfolioError> {
        let url = format!("{}/athlete", self.base_url);
        self.send_json(self.client.get(url)).await
    }

    /// One page of the athlete's activities; `before`/`after` are Unix seconds.
    pub async fn get_activities(
        &self,
        before: Option<i64>,
        after: Option<i64>,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<StravaActivity>, PortfolioError> {
        let mut query = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        if let Some(before) = before {
            query.push(("before", before.to_string()));
        }
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        let url = format!("{}/athlete/activities", self.base_url);
        self.send_json(self.client.get(url).query(&query)).await
    }

    /// First page only, at the default page size.
    pub async fn get_activities_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StravaActivity>, PortfolioError> {
        self.get_activities(
            Some(unix_seconds(end)),
            Some(unix_seconds(start)),
            1,
            DEFAULT_PER_PAGE,
        )
        .await
    }

    /// Every activity between `start` and `end`, walking pages of
    /// [`PAGE_SIZE`] until a short or empty page comes back.
    pub async fn get_all_activities_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StravaActivity>, PortfolioError> {
        let after = unix_seconds(start);
        let before = unix_seconds(end);
        let mut activities = Vec::new();

        for page in 1..=self.max_pages {
            let batch = self
                .get_activities(Some(before), Some(after), page, PAGE_SIZE)
                .await?;
            let fetched = batch.len();
            debug!(page, fetched, "fetched strava activity page");
            activities.extend(batch);

            if fetched < PAGE_SIZE as usize {
                info!(pages = page, total = activities.len(), "strava activities loaded");
                return Ok(activities);
            }
        }

        Err(PortfolioError::PageLimit {
            pages: self.max_pages,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, PortfolioError> {
        let response = request.bearer_auth(&self.access_token).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PortfolioError::Api { status });
        }
        Ok(response.json::<T>().await?)
    }
}

/// Midnight UTC of `date`, in seconds since the epoch.
pub fn unix_seconds(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc().timestamp())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_seconds_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2023, 9, 15).unwrap();
        assert_eq!(unix_seconds(date), 1_694_736_000);
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(unix_seconds(epoch), 0);
    }

    #[test]
    fn max_pages_never_zero() {
        let client = StravaClient::new(Client::new(), "http://localhost/", "t", "1").with_max_pages(0);
        assert_eq!(client.max_pages, 1);
        assert_eq!(client.base_url, "http://localhost");
    }
}
