//! # catalog-db: Database Layer for the Catalog Service
//!
//! This crate provides database access for the catalog service.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Data Flow                                │
//! │                                                                         │
//! │  Service call (create_product)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   catalog-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │ Query Builder│  │   │
//! │  │   │ (pool.rs +    │    │ (product.rs,  │    │  (query.rs)  │  │   │
//! │  │   │ transaction)  │◄───│  category.rs) │───►│              │  │   │
//! │  │   │ SqlitePool    │    │               │    │ WHERE/ORDER/ │  │   │
//! │  │   │ BEGIN/COMMIT  │    │               │    │ LIMIT/OFFSET │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │            categories ◄──FK── products                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`transaction`] - Transactional and non-transactional units of work
//! - [`query`] - Dynamic search query builder
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - sqlx error classification helpers
//! - [`repository`] - Product and category repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_db::{CategoryRepository, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("catalog.db")).await?;
//!
//! let id = db
//!     .with_transaction(|tx| Box::pin(async move {
//!         CategoryRepository.create(tx, "Shoes").await
//!     }))
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod query;
pub mod repository;
pub mod transaction;

// =============================================================================
// Re-exports
// =============================================================================

pub use pool::{Database, DbConfig};
pub use query::{build_search_query, QueryArg, SearchQuery, SearchTarget};
pub use transaction::Tx;

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
