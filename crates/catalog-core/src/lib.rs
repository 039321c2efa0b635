//! # catalog-core: Domain Model for the Catalog Service
//!
//! This crate holds everything the catalog knows about products and
//! categories that does not need a database or a network socket.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Service Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 catalog-api (axum handlers)                      │   │
//! │  │    GET /products, POST /category, PUT /product/{id}, ...         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  params   │  │    dto    │  │   error   │  │   │
//! │  │   │  Product  │  │  Search   │  │ Product   │  │ AppError  │  │   │
//! │  │   │  Category │  │  Metadata │  │ Category  │  │ ErrorKind │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                catalog-db (Database Layer)                      │   │
//! │  │      query builder, transactions, repositories (SQLite)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Persisted entities (Product, Category)
//! - [`params`] - Search parameters, sort direction, pagination metadata
//! - [`dto`] - Transport shapes for requests and responses
//! - [`error`] - The single error value used across the service
//! - [`validation`] - Field-level input validation

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dto;
pub mod error;
pub mod params;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{AppError, AppResult, ErrorKind, ValidationError};
pub use params::{Metadata, SearchParams, SortDirection};
pub use types::{Category, Product, ProductFields};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size used when a list request does not carry `limit`.
pub const DEFAULT_SEARCH_LIMIT: i64 = 100;

/// Page number used when a list request does not carry `offset`.
///
/// Offsets are 1-based: page 1 skips zero rows.
pub const DEFAULT_OFFSET: i64 = 1;
