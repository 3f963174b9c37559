use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("token exchange rejected: {status}")]
    Auth { status: StatusCode },
    #[error("strava api error: {status}")]
    Api { status: StatusCode },
    #[error("strava request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("token lifetime out of range: {expires_in}s")]
    TokenExpiry { expires_in: i64 },
    #[error("pagination stopped after {pages} full pages")]
    PageLimit { pages: u32 },
    #[error("{0}")]
    NotFound(String),
    #[error("unable to load portfolio data: {0}")]
    Load(String),
}

impl PortfolioError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn load(err: impl std::fmt::Display) -> Self {
        Self::Load(err.to_string())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Auth { status } | Self::Api { status } if *status == StatusCode::UNAUTHORIZED
        )
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Auth { .. } | Self::Api { .. } | Self::Transport(_)
            | Self::TokenExpiry { .. }
            | Self::PageLimit { .. } => {
                StatusCode::BAD_GATEWAY
            }
            Self::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl axum::response::IntoResponse for PortfolioError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), self.to_string()).into_response()
    }
}
