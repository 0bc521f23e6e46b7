//! Gateway error types.
//!
//! Request failures leave the process as a bare status code. The mapping
//! from [`ErrorKind`] is fixed:
//!
//! | Kind | Status |
//! |------|--------|
//! | `BadInput` | 400 |
//! | `NotFound` | 404 |
//! | `ValidationFailed` | 422 |
//! | `Internal` | 500 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hb_account_ordering::ErrorKind;
use thiserror::Error;

/// Startup and serving errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server loop failed
    #[error("server error: {0}")]
    Serve(String),
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadInput => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// A failed request. Renders as its status with an empty body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError(pub ErrorKind);

impl From<ErrorKind> for ApiError {
    fn from(kind: ErrorKind) -> Self {
        ApiError(kind)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        status_for(self.0).into_response()
    }
}
