//! HTTP handlers.
//!
//! Handlers parse the request, call one service method and choose the
//! success status. Failures convert to [`ApiError`](crate::error::ApiError).

pub mod category;
pub mod health;
pub mod params;
pub mod product;

use axum::http::Uri;

use catalog_core::AppError;

use crate::error::ApiError;

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError(AppError::not_found(format!("route {} not found", uri.path())))
}
