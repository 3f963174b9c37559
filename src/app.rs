use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use std::path::Path;
use tower_http::services::ServeDir;

pub fn router(state: AppState, asset_dir: &Path) -> Router {
    let asset_route = state.asset_base.trim_end_matches('/').to_string();

    let router = Router::new()
        .route("/", get(handlers::index))
        .route("/activite", get(handlers::detail))
        .route("/api/portfolio", get(handlers::get_portfolio))
        .route("/api/activity", get(handlers::get_activity));

    let router = if asset_route.starts_with('/') && asset_route.len() > 1 {
        router.nest_service(&asset_route, ServeDir::new(asset_dir))
    } else {
        router
    };

    router.with_state(state)
}
