//! Handlers for the read-only reporting endpoints.
//!
//! Every report is recomputed from the current table on each request.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use tracklist_core::insights::{parse_top_genres, require_artist, CleanHitsFilter};
use tracklist_db::repositories::InsightsRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

/// GET /api/tracks/summary/top-artists/
pub async fn top_artists(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = InsightsRepo::top_artists(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/tracks/summary/releases-by-year/
pub async fn releases_by_year(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = InsightsRepo::releases_by_year(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/tracks/summary/top-genres/?top=N
pub async fn top_genres(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let top = parse_top_genres(&params)?;
    let rows = InsightsRepo::top_genres(&state.pool, top).await?;
    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

/// GET /api/tracks/insights/clean-hits/
///
/// Params: `min_popularity` (default 70), `genre`, `year_from`, `year_to`,
/// `album_type`.
pub async fn clean_hits(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let filter = CleanHitsFilter::from_params(&params)?;
    let report = InsightsRepo::clean_hits(&state.pool, &filter).await?;

    tracing::debug!(
        min_popularity = filter.min_popularity,
        results = report.summary.results,
        "Clean hits computed"
    );

    Ok(Json(DataResponse { data: report }))
}

/// GET /api/tracks/insights/artist-albumtype-breakdown/?artist=
pub async fn artist_album_type_breakdown(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let artist = require_artist(&params)?;
    let rows = InsightsRepo::artist_album_type_breakdown(&state.pool, &artist).await?;
    Ok(Json(DataResponse { data: rows }))
}
