//! Liveness endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::services::health_service::{HealthReport, ServingStatus};
use crate::AppState;

/// `GET /health`
///
/// 200 while the database answers and the schema is current, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = state.health.check().await;
    let status = match report.status {
        ServingStatus::Serving => StatusCode::OK,
        ServingStatus::NotServing => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(report))
}
