use crate::config::StravaConfig;
use crate::errors::PortfolioError;
use crate::models::TokenResponse;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct CachedToken {
    access_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    fn valid_at(&self, now: DateTime<Utc>) -> Option<&str> {
        match (&self.access_token, self.expires_at) {
            (Some(token), Some(expires_at)) if now < expires_at => Some(token.as_str()),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    refresh_token: &'a str,
    grant_type: &'static str,
}

/// Exchanges the long-lived refresh token for short-lived access tokens.
///
/// The cache lock is held across the exchange, so concurrent callers wait
/// for a single refresh instead of racing their own.
pub struct StravaAuth {
    client: Client,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    token_url: String,
    cache: Mutex<CachedToken>,
}

impl StravaAuth {
    pub fn new(client: Client, config: &StravaConfig) -> Self {
        Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            refresh_token: config.refresh_token.clone(),
            token_url: config.token_url.clone(),
            cache: Mutex::new(CachedToken::default()),
        }
    }

    pub async fn get_valid_access_token(&self) -> Result<String, PortfolioError> {
        let mut cache = self.cache.lock().await;
        if let Some(token) = cache.valid_at(Utc::now()) {
            debug!("reusing cached strava token");
            return Ok(token.to_string());
        }

        let fresh = self.refresh_access_token().await?;
        let expires_at = expiry_after(Utc::now(), fresh.expires_in).ok_or(
            PortfolioError::TokenExpiry {
                expires_in: fresh.expires_in,
            },
        )?;
        cache.expires_at = Some(expires_at);
        cache.access_token = Some(fresh.access_token.clone());
        info!(expires_in = fresh.expires_in, "obtained new strava access token");
        Ok(fresh.access_token)
    }

    async fn refresh_access_token(&self) -> Result<TokenResponse, PortfolioError> {
        let response = self
            .client
            .post(&self.token_url)
            .json(&RefreshRequest {
                client_id: &self.client_id,
                client_secret: &self.client_secret,
                refresh_token: &self.refresh_token,
                grant_type: "refresh_token",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortfolioError::Auth { status });
        }

        Ok(response.json::<TokenResponse>().await?)
    }
}

/// `None` when `expires_in` does not fit a timestamp.
fn expiry_after(now: DateTime<Utc>, expires_in: i64) -> Option<DateTime<Utc>> {
    Duration::try_seconds(expires_in).and_then(|lifetime| now.checked_add_signed(lifetime))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_token_valid_only_before_expiry() {
        let now = Utc::now();
        let cache = CachedToken {
            access_token: Some("abc".to_string()),
            expires_at: Some(now + Duration::seconds(60)),
        };
        assert_eq!(cache.valid_at(now), Some("abc"));
        assert_eq!(cache.valid_at(now + Duration::seconds(60)), None);
        assert_eq!(cache.valid_at(now + Duration::seconds(61)), None);
    }

    #[test]
    fn empty_cache_is_never_valid() {
        assert_eq!(CachedToken::default().valid_at(Utc::now()), None);
        let cache = CachedToken {
            access_token: Some("abc".to_string()),
            expires_at: None,
        };
        assert_eq!(cache.valid_at(Utc::now()), None);
    }

    #[test]
    fn oversized_lifetime_has_no_expiry() {
        let now = Utc::now();
        assert_eq!(expiry_after(now, 60), Some(now + Duration::seconds(60)));
        assert_eq!(expiry_after(now, i64::MAX), None);
        assert_eq!(expiry_after(now, 1_000_000_000_000_000), None);
    }
}
