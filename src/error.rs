//! Relay error types with HTTP status code mapping.
//!
//! [`RelayError`] is the error type returned by every handler. Each variant
//! maps to an HTTP status code and the JSON failure envelope that
//! publishers and subscribers see.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::RegisterError;

/// JSON body of every failed request.
///
/// ```json
/// {
///   "success": false,
///   "error": { "code": 1001, "message": "invalid request: missing field `timestamp`" }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`; mirrors the `success: true` publish acknowledgement.
    pub success: bool,
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status                   |
/// |-----------|------------|-------------------------------|
/// | 1000–1999 | Validation | 400 Bad Request               |
/// | 3000–3999 | Server     | 500 / 503                     |
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Publish payload could not be read as a message.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The push stream could not be opened.
    #[error("stream unavailable: {0}")]
    StreamUnavailable(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Internal(_) => 3000,
            Self::StreamUnavailable(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::StreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl From<RegisterError> for RelayError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::Closed => Self::StreamUnavailable(err.to_string()),
            RegisterError::Render(_) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            success: false,
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_is_bad_request() {
        let err = RelayError::InvalidRequest("bad".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1001);
    }

    #[test]
    fn closed_hub_maps_to_service_unavailable() {
        let err = RelayError::from(RegisterError::Closed);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.error_code(), 3002);
    }

    #[test]
    fn snapshot_render_failure_is_internal_error() {
        let Err(json_err) = serde_json::from_str::<i64>("not a number") else {
            panic!("expected a parse failure");
        };
        let err = RelayError::from(RegisterError::Render(json_err));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), 3000);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn response_carries_status() {
        let response = RelayError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
