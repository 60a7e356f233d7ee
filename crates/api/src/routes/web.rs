//! Route definitions for the HTML pages.

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::web::pages;

/// ```text
/// GET       /                      -> index
/// GET       /tracks/               -> list_tracks
/// GET|POST  /tracks/new/           -> new_track | create_track
/// GET       /tracks/{id}/          -> track_detail
/// GET|POST  /tracks/{id}/edit/     -> edit_track | update_track
/// GET|POST  /tracks/{id}/delete/   -> confirm_delete | delete_track
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/tracks/", get(pages::list_tracks))
        .route(
            "/tracks/new/",
            get(pages::new_track).post(pages::create_track),
        )
        .route("/tracks/{id}/", get(pages::track_detail))
        .route(
            "/tracks/{id}/edit/",
            get(pages::edit_track).post(pages::update_track),
        )
        .route(
            "/tracks/{id}/delete/",
            get(pages::confirm_delete).post(pages::delete_track),
        )
}
