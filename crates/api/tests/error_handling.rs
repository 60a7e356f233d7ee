//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly and need no database.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use tracklist_api::error::{field_errors_from_validator, AppError};
use tracklist_api::web::error::PageError;
use tracklist_core::error::{CoreError, FieldErrors};
use validator::Validate;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Track",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Track with id 42 not found");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("EOF while parsing an object".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "EOF while parsing an object");
}

// ---------------------------------------------------------------------------
// Test: AppError::NotFound maps to 404 with its own message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unaddressable_url_returns_404() {
    let err = AppError::NotFound("No track at /api/tracks/abc/".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "No track at /api/tracks/abc/");
}

// ---------------------------------------------------------------------------
// Test: database failures map to 500 and sanitize the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn database_error_returns_500_and_sanitizes_message() {
    let err = AppError::Database(sqlx::Error::Protocol("secret wire state".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("secret"));
    assert_eq!(json["error"], "An internal error occurred");

    let (status, _) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: validation errors map to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("year must be an integer".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "year must be an integer");
    assert!(json.get("fields").is_none());
}

#[tokio::test]
async fn invalid_fields_include_field_map() {
    let mut fields = FieldErrors::new();
    fields.add("album_type", "'mixtape' is not a valid album type.");

    let (status, json) = error_to_response(AppError::Core(CoreError::InvalidFields(fields))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["fields"]["album_type"][0],
        "'mixtape' is not a valid album type."
    );
}

#[derive(Validate)]
struct Scores {
    #[validate(range(min = 0, max = 100, message = "score must be 0–100."))]
    score: i32,
    #[validate(range(min = 1))]
    rank: i32,
}

#[test]
fn validator_messages_fall_back_to_rule_code() {
    let errors = Scores { score: 101, rank: 0 }.validate().unwrap_err();
    let fields = field_errors_from_validator(&errors);

    assert_eq!(fields.messages("score"), ["score must be 0–100."]);
    assert_eq!(fields.messages("rank"), ["range"]);

    let app_err: AppError = errors.into();
    assert_matches!(app_err, AppError::Core(CoreError::InvalidFields(_)));
}

// ---------------------------------------------------------------------------
// Test: page errors keep the JSON status but render HTML
// ---------------------------------------------------------------------------

#[tokio::test]
async fn page_errors_render_html_with_matching_status() {
    let response = PageError::from(CoreError::NotFound {
        entity: "Track",
        id: 7,
    })
    .into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&bytes).contains("Track with id 7 not found"));

    let response = PageError::NotFound("Invalid page.".into()).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
