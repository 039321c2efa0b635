//! Health check service.
//!
//! Reports database liveness and schema state for monitoring.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use catalog_db::migrations::migration_status;
use catalog_db::Database;

/// Serving status reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServingStatus {
    Serving,
    NotServing,
}

/// Health report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: ServingStatus,
    pub message: String,
    /// Applied schema migrations, when the database answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrations_applied: Option<usize>,
    pub server_time: String,
}

/// Health service implementation.
#[derive(Debug, Clone)]
pub struct HealthService {
    db: Database,
}

impl HealthService {
    /// Create a new health service.
    pub fn new(db: Database) -> Self {
        HealthService { db }
    }

    /// Check the health of the database.
    pub async fn check(&self) -> HealthReport {
        let (status, message, migrations_applied) = if !self.db.health_check().await {
            warn!("Database health check failed");
            (
                ServingStatus::NotServing,
                "Database unavailable".to_string(),
                None,
            )
        } else {
            match migration_status(self.db.pool()).await {
                Ok((total, applied)) if applied >= total => (
                    ServingStatus::Serving,
                    "All systems operational".to_string(),
                    Some(applied),
                ),
                Ok((total, applied)) => (
                    ServingStatus::NotServing,
                    format!("Pending migrations: {applied} of {total} applied"),
                    Some(applied),
                ),
                Err(e) => {
                    warn!(error = %e.detailed(), "Migration status unavailable");
                    (ServingStatus::NotServing, e.message().to_string(), None)
                }
            }
        };

        HealthReport {
            status,
            message,
            migrations_applied,
            server_time: Utc::now().to_rfc3339(),
        }
    }
}
