use serde::Serialize;

/// Success body of every JSON route: `{"data": ...}`.
///
/// Errors use the `{"error", "code"}` shape from [`crate::error::AppError`]
/// instead, so clients can tell the two apart by the top-level key.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
