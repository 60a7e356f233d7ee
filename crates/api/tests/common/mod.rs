#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use tracklist_api::config::ServerConfig;
use tracklist_api::router::build_app_router;
use tracklist_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
    }
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState { pool }, &test_config())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: &Value) -> Response<Body> {
    json_request(app, Method::PUT, uri, body).await
}

async fn json_request(app: Router, method: Method, uri: &str, body: &Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(app: Router, uri: &str, fields: &[(&str, String)]) -> Response<Body> {
    let encoded = serde_urlencoded::to_string(fields).unwrap();
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(encoded))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A valid JSON payload for the track API; tweak fields per test.
pub fn track_json(track_id: &str) -> Value {
    json!({
        "track_id": track_id,
        "track_name": format!("Song {track_id}"),
        "track_number": 1,
        "track_popularity": 50,
        "explicit": false,
        "artist_name": "Artist",
        "artist_popularity": 60,
        "artist_followers": 1000,
        "artist_genres": "pop",
        "album_id": "ALB1",
        "album_name": "Album",
        "album_release_date": "2020-01-01",
        "album_total_tracks": 10,
        "album_type": "album",
        "track_duration_min": 3.5,
    })
}

/// Same fields as [`track_json`], as form pairs.
pub fn track_form(track_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("track_id", track_id.to_string()),
        ("track_name", format!("Song {track_id}")),
        ("track_number", "1".to_string()),
        ("track_popularity", "50".to_string()),
        ("artist_name", "Artist".to_string()),
        ("artist_popularity", "60".to_string()),
        ("artist_followers", "1000".to_string()),
        ("artist_genres", "pop".to_string()),
        ("album_id", "ALB1".to_string()),
        ("album_name", "Album".to_string()),
        ("album_release_date", "2020-01-01".to_string()),
        ("album_total_tracks", "10".to_string()),
        ("album_type", "album".to_string()),
        ("track_duration_min", "3.5".to_string()),
    ]
}

/// Create a track through the API and return its `id`.
pub async fn create_track(pool: &PgPool, body: &Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/api/tracks/", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
