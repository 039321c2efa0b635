//! # Domain Types
//!
//! The two persisted entities of the catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐            ┌─────────────────┐                     │
//! │  │    Category     │ 1      n   │     Product     │                     │
//! │  │  ─────────────  │◄───────────│  ─────────────  │                     │
//! │  │  id (i64)       │            │  id (i64)       │                     │
//! │  │  name           │            │  title          │                     │
//! │  │  created_at     │            │  description    │                     │
//! │  └─────────────────┘            │  price (≥ 0)    │                     │
//! │                                 │  image          │                     │
//! │                                 │  category_id FK │                     │
//! │                                 │  created_at     │                     │
//! │                                 └─────────────────┘                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identities are generated by the database on insert; a value of these
//! types always mirrors a stored row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    /// Database-generated identifier.
    pub id: i64,

    /// Display name, non-empty.
    pub name: String,

    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Database-generated identifier.
    pub id: i64,

    pub title: String,

    pub description: String,

    /// Non-negative unit price.
    pub price: f64,

    /// Image reference (usually a URL).
    pub image: String,

    /// Owning category; must reference an existing [`Category`].
    pub category_id: i64,

    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
}

/// Field values for a product insert or update.
///
/// ## Why a Separate Type?
/// The id and timestamp are owned by the database, so writes only carry the
/// columns a caller may set.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category_id: i64,
}

impl From<&Product> for ProductFields {
    fn from(p: &Product) -> Self {
        ProductFields {
            title: p.title.clone(),
            description: p.description.clone(),
            price: p.price,
            image: p.image.clone(),
            category_id: p.category_id,
        }
    }
}
