use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::{debug, instrument};

use crate::{
    error::ApiError,
    search::dto::{SearchMatch, SearchParams, SearchResponse},
    state::AppState,
    users::repo,
};

pub fn search_routes() -> Router<AppState> {
    Router::new().route("/search", get(search))
}

/// GET /api/search?q= — has this name, phone, or email been claimed?
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::Validation("Missing search query".into()))?;

    // Escaped so metacharacters in user input match literally.
    let pattern = regex::escape(query);
    let rows = repo::search_partners(&state.db, &pattern).await?;

    debug!(query, count = rows.len(), "partner search");
    let matches: Vec<SearchMatch> = rows.into_iter().map(SearchMatch::from).collect();
    Ok(Json(SearchResponse {
        success: true,
        count: matches.len(),
        matches,
    }))
}
