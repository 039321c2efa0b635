//! Error responses for the Catalog API.
//!
//! Every failure leaves the server as `{"message": "..."}` with the status
//! derived from its [`ErrorKind`]. The cause chain only goes to the log.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use catalog_core::{AppError, ErrorKind, ValidationError};

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// HTTP wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        self.0.kind()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::bad_request("invalid json body").with_source(rejection))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(AppError::bad_request("invalid query string").with_source(rejection))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let status =
            StatusCode::from_u16(kind.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if kind.is_client_error() {
            tracing::warn!(%kind, error = %self.0.detailed(), "request rejected");
        } else {
            tracing::error!(%kind, error = %self.0.detailed(), "request failed");
        }

        let body = ErrorMessage {
            message: self.0.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
