//! Request extractors whose rejections render through [`AppError`] and
//! [`PageError`] instead of axum's plain-text bodies.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use tracklist_core::types::DbId;

use crate::error::AppError;
use crate::web::error::PageError;

/// JSON request body.
///
/// Syntax errors, type mismatches (e.g. a popularity outside `i32`) and a
/// missing `Content-Type` all become 400 `BAD_REQUEST`.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(%rejection, "Rejected JSON body");
                Err(AppError::BadRequest(rejection.body_text()))
            }
        }
    }
}

/// The `{id}` segment of a track URL.
///
/// A segment that is not an integer cannot name a track, so it is a 404
/// like any unknown id.
pub struct TrackId(pub DbId);

impl<S> FromRequestParts<S> for TrackId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<DbId>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                tracing::debug!(%rejection, path = %parts.uri.path(), "Unparseable track id");
                Err(AppError::NotFound(format!("No track at {}", parts.uri.path())))
            }
        }
    }
}

/// [`TrackId`] for the HTML pages; rejects with the HTML error page.
pub struct PageTrackId(pub DbId);

impl<S> FromRequestParts<S> for PageTrackId
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TrackId(id) = TrackId::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}
