//! API error type and its HTTP translation.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Convenience alias for handler results.
pub type ApiResult<T> = Result<T, ApiError>;

/// An error ready to be rendered as an HTTP response.
///
/// Handlers log the underlying cause; the detail carried here is the
/// client-facing message only.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl ApiError {
    /// A server-side failure.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }

    /// A request the client can fix.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}
