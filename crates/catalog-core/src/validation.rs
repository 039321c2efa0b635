//! # Validation Module
//!
//! Field-level checks applied to request bodies before any database work.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (axum)                                         │
//! │  ├── Malformed JSON, non-integer path ids, bad query numbers           │
//! │  └── Rejected as BadRequest                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: DTO validate()                                                │
//! │  └── THIS MODULE: required strings, non-negative price                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── NOT NULL / CHECK(price >= 0)                                       │
//! │  └── Foreign key products.category_id → categories.id                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::validation::{validate_non_negative, validate_required};
//!
//! assert!(validate_required("name", "Shoes").is_ok());
//! assert!(validate_required("name", "   ").is_err());
//! assert!(validate_non_negative("price", 0.0).is_ok());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates that a string field carries something other than whitespace.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates that a number is zero or greater.
///
/// NaN fails the check.
pub fn validate_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    if !(value >= 0.0) {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Parses a path segment as an entity id.
///
/// ## Example
/// ```rust
/// use catalog_core::validation::parse_id;
///
/// assert_eq!(parse_id("product", "42").unwrap(), 42);
/// assert!(parse_id("product", "forty-two").is_err());
/// ```
pub fn parse_id(entity: &str, raw: &str) -> ValidationResult<i64> {
    raw.parse::<i64>().map_err(|_| ValidationError::InvalidId {
        entity: entity.to_string(),
        value: raw.to_string(),
    })
}
