//! # Catalog API
//!
//! JSON over HTTP for the product catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog API Layers                              │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  router        │  │  handlers      │  │  services                  ││
//! │  │                │  │                │  │                            ││
//! │  │ • routes       │─►│ • parse query  │─►│ • ProductService           ││
//! │  │ • TraceLayer   │  │ • parse ids    │  │ • CategoryService          ││
//! │  │ • JSON header  │  │ • status codes │  │ • HealthService            ││
//! │  └────────────────┘  └────────────────┘  └─────────────┬──────────────┘│
//! │                                                         │               │
//! │  ┌──────────────────────────────────────────────────────▼───────────┐  │
//! │  │  catalog-db: with_transaction / without_transaction + repos      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (see [`config::ApiConfig`]):
//! - `BIND_ADDR` - Listen address (default: 0.0.0.0:8080)
//! - `DATABASE_PATH` - SQLite file (default: catalog.db)
//! - `DB_POOL_SIZE_MAX` / `DB_POOL_SIZE_IDLE` - Pool bounds (default: 10 / 2)
//! - `DB_CONN_MAX_LIFETIME_SECS` - Connection lifetime (default: 600)
//! - `DB_ACQUIRE_TIMEOUT_SECS` - Wait for a connection (default: 30)
//! - `DB_OPERATION_TIMEOUT_SECS` - Per query/transaction (default: 30)
//! - `DEFAULT_SEARCH_LIMIT` - Page size without `limit` (default: 100)
//! - `LOG_LEVEL` - Tracing filter override

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod services;

use catalog_db::Database;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use router::build_router;

use crate::services::{CategoryService, HealthService, ProductService};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub products: ProductService,
    pub categories: CategoryService,
    pub health: HealthService,
    pub default_search_limit: i64,
}

impl AppState {
    /// Wires every service to one database handle.
    pub fn new(db: Database, default_search_limit: i64) -> Self {
        AppState {
            products: ProductService::new(db.clone()),
            categories: CategoryService::new(db.clone()),
            health: HealthService::new(db),
            default_search_limit,
        }
    }
}
