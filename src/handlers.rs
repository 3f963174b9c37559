use crate::enrich::{enrich_records, EnrichOutcome};
use crate::errors::PortfolioError;
use crate::models::{ActivityQuery, ActivityRecord, PortfolioResponse};
use crate::state::AppState;
use crate::storage::load_portfolio;
use crate::table::{calculate_totals, find_by_slug, group_by_category, ColumnLabels};
use crate::ui::{render_detail_page, render_error_page, render_summary_page};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Utc;
use tracing::warn;

pub async fn index(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    match load_enriched(&state).await {
        Ok((records, outcome)) => (
            StatusCode::OK,
            Html(render_summary_page(
                &records,
                outcome.velo_hours(),
                &ColumnLabels::default(),
            )),
        ),
        Err(err) => (err.status(), Html(render_error_page(&err.to_string()))),
    }
}

pub async fn detail(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> (StatusCode, Html<String>) {
    let result = load_portfolio(&state.data_path).await.and_then(|records| {
        lookup(&records, query.activity.as_deref())
            .map(|activity| render_detail_page(activity, &state.asset_base))
    });

    match result {
        Ok(page) => (StatusCode::OK, Html(page)),
        Err(err) => {
            warn!(activity = ?query.activity, error = %err, "activity detail unavailable");
            (err.status(), Html(render_error_page(&err.to_string())))
        }
    }
}

pub async fn get_portfolio(
    State(state): State<AppState>,
) -> Result<Json<PortfolioResponse>, PortfolioError> {
    let (records, _) = load_enriched(&state).await?;
    Ok(Json(PortfolioResponse {
        groups: group_by_category(&records),
        totals: calculate_totals(&records),
    }))
}

pub async fn get_activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<ActivityRecord>, PortfolioError> {
    let records = load_portfolio(&state.data_path).await?;
    let activity = lookup(&records, query.activity.as_deref())?;
    Ok(Json(activity.clone()))
}

async fn load_enriched(
    state: &AppState,
) -> Result<(Vec<ActivityRecord>, EnrichOutcome), PortfolioError> {
    let mut records = load_portfolio(&state.data_path).await?;
    let outcome = enrich_records(
        state.enricher.as_deref(),
        &mut records,
        Utc::now().date_naive(),
    )
    .await;
    Ok((records, outcome))
}

fn lookup<'a>(
    records: &'a [ActivityRecord],
    slug: Option<&str>,
) -> Result<&'a ActivityRecord, PortfolioError> {
    let slug = slug
        .map(str::trim)
        .filter(|slug| !slug.is_empty())
        .ok_or_else(|| PortfolioError::not_found("Aucune activité spécifiée"))?;
    find_by_slug(records, slug).ok_or_else(|| PortfolioError::not_found("Activité non trouvée"))
}
