//! Service health, mounted at the root beside `/api` and the pages.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthResponse {
    fn from_db_check(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

/// GET /health
///
/// 200 while the pool can run `SELECT 1`, otherwise 503 with the same body.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let db = tracklist_db::health_check(&state.pool).await;
    if let Err(err) = &db {
        tracing::warn!(error = %err, "Health check could not reach the database");
    }

    let body = HealthResponse::from_db_check(db.is_ok());
    let status = if body.db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
