//! Route definitions for the reporting endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::insights;
use crate::state::AppState;

/// ```text
/// GET /api/tracks/summary/top-artists/                  -> top_artists
/// GET /api/tracks/summary/releases-by-year/             -> releases_by_year
/// GET /api/tracks/summary/top-genres/                   -> top_genres
/// GET /api/tracks/insights/clean-hits/                  -> clean_hits
/// GET /api/tracks/insights/artist-albumtype-breakdown/  -> artist_album_type_breakdown
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tracks/summary/top-artists/", get(insights::top_artists))
        .route(
            "/api/tracks/summary/releases-by-year/",
            get(insights::releases_by_year),
        )
        .route("/api/tracks/summary/top-genres/", get(insights::top_genres))
        .route("/api/tracks/insights/clean-hits/", get(insights::clean_hits))
        .route(
            "/api/tracks/insights/artist-albumtype-breakdown/",
            get(insights::artist_album_type_breakdown),
        )
}
