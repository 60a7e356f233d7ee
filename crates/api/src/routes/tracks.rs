//! Route definitions for track CRUD.

use axum::routing::get;
use axum::Router;

use crate::handlers::tracks;
use crate::state::AppState;

/// ```text
/// GET    /api/tracks/          -> list_tracks
/// POST   /api/tracks/          -> create_track
/// GET    /api/tracks/{id}/     -> get_track
/// PUT    /api/tracks/{id}/     -> update_track
/// DELETE /api/tracks/{id}/     -> delete_track
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/tracks/",
            get(tracks::list_tracks).post(tracks::create_track),
        )
        .route(
            "/api/tracks/{id}/",
            get(tracks::get_track)
                .put(tracks::update_track)
                .delete(tracks::delete_track),
        )
}
