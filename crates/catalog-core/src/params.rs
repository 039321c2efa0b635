//! # Search Parameters
//!
//! Request-scoped filter, sort and pagination values for list endpoints,
//! plus the pagination metadata echoed back with every page.
//!
//! ## Pagination Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  offset is 1-based (a page number), limit is the page size              │
//! │                                                                         │
//! │   limit = 10                                                            │
//! │   offset = 1  ──► rows  0..10   (skip 0)                                │
//! │   offset = 2  ──► rows 10..20   (skip 10)                               │
//! │   offset = 3  ──► rows 20..30   (skip 20)                               │
//! │                                                                         │
//! │   skip = (offset - 1) * limit                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::ValidationResult;
use crate::{DEFAULT_OFFSET, DEFAULT_SEARCH_LIMIT};

// =============================================================================
// Sort Direction
// =============================================================================

/// Direction for an explicit `sort` request.
///
/// ## Why an Enum?
/// The direction ends up inside the SQL text (it cannot be a bound
/// parameter), so only these two literals can ever reach the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub const fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    /// Accepts `asc` / `desc` in any letter case and nothing else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(ValidationError::NotAllowed {
                field: "sort".to_string(),
                allowed: vec!["asc".to_string(), "desc".to_string()],
                value: s.to_string(),
            })
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

// =============================================================================
// Search Params
// =============================================================================

/// Filter, sort and pagination request for a list query.
///
/// `name` and `title` both filter the entity's primary text column; they
/// are kept as two fields because clients use either spelling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    pub sort: Option<SortDirection>,
    pub title: Option<String>,
    pub name: Option<String>,
    /// Page size.
    pub limit: Option<i64>,
    /// 1-based page number.
    pub offset: Option<i64>,
    /// Lower price bound (inclusive). Only applied together with `max`.
    pub min: Option<f64>,
    /// Upper price bound (inclusive). Only applied together with `min`.
    pub max: Option<f64>,
}

impl SearchParams {
    /// Fills absent `limit` and `offset` with the defaults.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::SearchParams;
    ///
    /// let params = SearchParams::default().with_defaults(100);
    /// assert_eq!(params.limit, Some(100));
    /// assert_eq!(params.offset, Some(1));
    /// ```
    pub fn with_defaults(mut self, default_limit: i64) -> Self {
        self.limit.get_or_insert(default_limit);
        self.offset.get_or_insert(DEFAULT_OFFSET);
        self
    }

    /// Number of rows to skip, `(offset - 1) * limit`.
    ///
    /// Only meaningful when both values are present. Saturates at `i64::MAX`;
    /// [`validate`](Self::validate) rejects pages that would get there.
    pub fn row_skip(&self) -> Option<i64> {
        match (self.offset, self.limit) {
            (Some(offset), Some(limit)) => Some(offset.saturating_sub(1).saturating_mul(limit)),
            _ => None,
        }
    }

    /// Checks pagination bounds.
    ///
    /// ## Rules
    /// - `limit` must not be negative
    /// - `offset` must be at least 1
    /// - `(offset - 1) * limit` must fit in an `i64`
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(limit) = self.limit {
            if limit < 0 {
                return Err(ValidationError::TooSmall {
                    field: "limit".to_string(),
                    min: 0,
                });
            }
        }
        if let Some(offset) = self.offset {
            if offset < DEFAULT_OFFSET {
                return Err(ValidationError::TooSmall {
                    field: "offset".to_string(),
                    min: DEFAULT_OFFSET,
                });
            }
        }
        if let (Some(offset), Some(limit)) = (self.offset, self.limit) {
            if (offset - 1).checked_mul(limit).is_none() {
                return Err(ValidationError::PageOutOfRange { offset, limit });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Metadata
// =============================================================================

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Rows in the whole table; list filters are not applied.
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    /// Entries actually returned in this page.
    pub total_entries: i64,
}

impl Metadata {
    /// Builds metadata for a page of `entries` rows fetched with `params`.
    pub fn new(total: i64, params: &SearchParams, entries: usize) -> Self {
        Metadata {
            total,
            limit: params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
            offset: params.offset.unwrap_or(DEFAULT_OFFSET),
            total_entries: entries as i64,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
