//! HTML rendering of handler errors.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracklist_core::error::CoreError;

use crate::error::{classify, AppError};
use crate::web::html::{escape, layout};

/// Error returned by page handlers, rendered as a plain HTML page.
///
/// Wrapped [`AppError`]s keep the status the JSON API would use.
#[derive(Debug)]
pub enum PageError {
    App(AppError),
    /// Not addressable, e.g. a page number past the end of the list.
    NotFound(String),
}

pub type PageResult<T> = Result<T, PageError>;

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError::App(err)
    }
}

impl From<CoreError> for PageError {
    fn from(err: CoreError) -> Self {
        PageError::App(AppError::Core(err))
    }
}

impl From<sqlx::Error> for PageError {
    fn from(err: sqlx::Error) -> Self {
        PageError::App(AppError::Database(err))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::App(err) => {
                let (status, _, message) = classify(&err);
                render_error(status, &message)
            }
            PageError::NotFound(message) => render_error(StatusCode::NOT_FOUND, &message),
        }
    }
}

/// Minimal error page.
pub fn render_error(status: StatusCode, message: &str) -> Response {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"        <div class="card">
            <p>{}</p>
            <p><a href="/tracks/">Back to tracks</a></p>
        </div>"#,
        escape(message)
    );
    (status, Html(layout(title, &body))).into_response()
}
