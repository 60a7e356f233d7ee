pub mod health;
pub mod insights;
pub mod tracks;
pub mod web;

use axum::Router;

use crate::state::AppState;

/// Build the JSON API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /api/tracks/                                          list, create
/// /api/tracks/{id}/                                     get, update, delete
///
/// /api/tracks/summary/top-artists/                      top artists by track count
/// /api/tracks/summary/releases-by-year/                 per-year counts
/// /api/tracks/summary/top-genres/                       genre frequency (?top=)
/// /api/tracks/insights/clean-hits/                      non-explicit popular tracks
/// /api/tracks/insights/artist-albumtype-breakdown/      per artist + album type (?artist=)
/// ```
///
/// Paths keep their trailing slash; the routes are registered as full paths
/// rather than nested so `/api/tracks/` matches exactly.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(tracks::router())
        .merge(insights::router())
}

/// Build the server-rendered page tree.
///
/// ```text
/// /                             index
/// /tracks/                      list with filters and sidebar insights
/// /tracks/new/                  create form
/// /tracks/{id}/                 detail
/// /tracks/{id}/edit/            edit form
/// /tracks/{id}/delete/          delete confirmation
/// ```
pub fn web_routes() -> Router<AppState> {
    web::router()
}
