//! Handlers for track CRUD over JSON.
//!
//! Create and update run two rule layers: the `validator` rules on
//! [`TrackInput`] and then the model check, which sees the current date.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracklist_core::error::CoreError;
use tracklist_core::filter::{parse_ordering, TrackFilter, API_SEARCH_PARAM, ORDERING_PARAM};
use tracklist_db::models::track::TrackInput;
use tracklist_db::repositories::TrackRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, TrackId};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/tracks/
///
/// Filter params as for the web list, with `search` as the free-text key and
/// `ordering` selecting the sort (default `-track_popularity`).
pub async fn list_tracks(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let filter = TrackFilter::from_params(&params, API_SEARCH_PARAM)?;
    let ordering = parse_ordering(params.get(ORDERING_PARAM).map(String::as_str));

    let tracks = TrackRepo::list(&state.pool, &filter, &ordering).await?;

    Ok(Json(DataResponse { data: tracks }))
}

/// POST /api/tracks/
pub async fn create_track(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<TrackInput>,
) -> AppResult<impl IntoResponse> {
    check_input(&input)?;

    let track = TrackRepo::create(&state.pool, &input).await?;

    tracing::info!(id = track.id, track_id = %track.track_id, "Track created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: track })))
}

/// GET /api/tracks/{id}/
pub async fn get_track(
    State(state): State<AppState>,
    TrackId(id): TrackId,
) -> AppResult<impl IntoResponse> {
    let track = TrackRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Track", id }))?;

    Ok(Json(DataResponse { data: track }))
}

/// PUT /api/tracks/{id}/
///
/// Full replacement; every field must be supplied.
pub async fn update_track(
    State(state): State<AppState>,
    TrackId(id): TrackId,
    JsonBody(input): JsonBody<TrackInput>,
) -> AppResult<impl IntoResponse> {
    check_input(&input)?;

    let track = TrackRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Track", id }))?;

    tracing::info!(id, track_id = %track.track_id, "Track updated");

    Ok(Json(DataResponse { data: track }))
}

/// DELETE /api/tracks/{id}/
pub async fn delete_track(
    State(state): State<AppState>,
    TrackId(id): TrackId,
) -> AppResult<impl IntoResponse> {
    let deleted = TrackRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Track", id }));
    }

    tracing::info!(id, "Track deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check_input(input: &TrackInput) -> AppResult<()> {
    input.validate()?;
    input.check(chrono::Utc::now().date_naive())?;
    Ok(())
}
