//! Mapping of relay errors onto HTTP responses.

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::RelayError;

use super::types::{ErrorResponse, STATUS_ERROR};

/// Error returned by API handlers.
///
/// Validation failures become `400 Bad Request`, body extraction failures keep
/// their own status, and everything else is a `500 Internal Server Error`.
/// The body is always `{status: "error", message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn validation(error: RelayError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: error.to_string(),
        }
    }

    pub fn internal(error: RelayError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: error.to_string(),
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(error: RelayError) -> Self {
        if error.is_validation() {
            Self::validation(error)
        } else {
            Self::internal(error)
        }
    }
}

/// Body extraction failures keep their status (`413` for oversized bodies)
/// but answer with the JSON error payload instead of axum's plain text.
impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("API request failed: {}", self.message);
        } else {
            tracing::warn!("API request rejected: {}", self.message);
        }

        let body = ErrorResponse {
            status: STATUS_ERROR.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
