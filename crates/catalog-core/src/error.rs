//! # Error Types
//!
//! The error value shared by every layer of the catalog service.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ValidationError (this file)  - field-level input problems             │
//! │        │                                                                │
//! │        ▼ (always BadRequest)                                            │
//! │  AppError { kind, message, source }                                     │
//! │        ▲                                                                │
//! │        │ (RowNotFound → NotFound, anything else → Internal)            │
//! │  sqlx::Error (classified in catalog-db)                                 │
//! │                                                                         │
//! │  Transport: ErrorKind → HTTP status, message → {"message": ...}        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. One error value with an explicit [`ErrorKind`] tag; callers match on
//!    the kind, never on the concrete cause
//! 2. The message is what a client may see; the cause chain is for logs only
//! 3. Use `thiserror` for derive macros (not manual impl)

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Boxed underlying cause of an [`AppError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// =============================================================================
// Error Kind
// =============================================================================

/// Classification of a failure.
///
/// ## Status Mapping
/// | Kind           | HTTP |
/// |----------------|------|
/// | `BadRequest`   | 400  |
/// | `NotFound`     | 404  |
/// | `Internal`     | 500  |
/// | `Unclassified` | 500  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Malformed or missing client input.
    BadRequest,

    /// A lookup matched no rows.
    NotFound,

    /// Storage, driver or row-mapping failure.
    Internal,

    /// Fallback for failures nobody classified.
    Unclassified,
}

impl ErrorKind {
    /// HTTP status code for this kind.
    pub const fn status_code(self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Internal | ErrorKind::Unclassified => 500,
        }
    }

    /// Whether the failure was caused by the client rather than the server.
    pub const fn is_client_error(self) -> bool {
        matches!(self, ErrorKind::BadRequest | ErrorKind::NotFound)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::BadRequest => "bad request",
            ErrorKind::NotFound => "not found",
            ErrorKind::Internal => "internal error",
            ErrorKind::Unclassified => "application error",
        };
        f.write_str(name)
    }
}

// =============================================================================
// App Error
// =============================================================================

/// A classified failure with a client-safe message and an optional cause.
///
/// ## Example
/// ```rust
/// use catalog_core::{AppError, ErrorKind};
///
/// let err = AppError::not_found("product with ID 7 not found");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.to_string(), "product with ID 7 not found");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl AppError {
    /// Creates an error of the given kind without an underlying cause.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        AppError {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a BadRequest error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::new(ErrorKind::BadRequest, message)
    }

    /// Creates a NotFound error.
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::new(ErrorKind::NotFound, message)
    }

    /// Creates an Internal error wrapping the failure that caused it.
    pub fn internal(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        AppError::new(ErrorKind::Internal, message).with_source(source)
    }

    /// Creates an Unclassified error.
    pub fn unclassified(message: impl Into<String>) -> Self {
        AppError::new(ErrorKind::Unclassified, message)
    }

    /// Attaches an underlying cause.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the client-safe message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message plus the full cause chain, for logs.
    pub fn detailed(&self) -> String {
        let mut detail = self.message.clone();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            detail.push_str(" original_cause: ");
            detail.push_str(&err.to_string());
            cause = err.source();
        }
        detail
    }

    /// Re-tags a NotFound as Internal, keeping this error as the cause.
    ///
    /// Used where a missing row means broken referential integrity rather
    /// than a bad client lookup.
    pub fn not_found_as_internal(self, message: impl Into<String>) -> Self {
        if self.kind == ErrorKind::NotFound {
            AppError::internal(message, self)
        } else {
            self
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::bad_request(err.to_string()).with_source(err)
    }
}

/// Generic driver conversion for `?` on raw sqlx calls.
///
/// Repositories prefer the contextual helpers in catalog-db; this keeps the
/// same classification for everything else.
#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::not_found("record not found").with_source(err),
            sqlx::Error::PoolTimedOut => {
                AppError::internal("database connection pool exhausted", err)
            }
            _ => AppError::internal("database operation failed", err),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// They always surface as [`ErrorKind::BadRequest`].
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} must be greater than or equal to 0")]
    Negative { field: String },

    /// A numeric query parameter could not be parsed.
    #[error("{field} parameter value is not {expected}. {field} = {value}")]
    NotANumber {
        field: String,
        expected: &'static str,
        value: String,
    },

    /// Numeric value is below its lower bound.
    #[error("{field} must be at least {min}")]
    TooSmall { field: String, min: i64 },

    /// The page starts beyond the addressable row range.
    #[error("offset {offset} is out of range for limit {limit}")]
    PageOutOfRange { offset: i64, limit: i64 },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}, got '{value}'")]
    NotAllowed {
        field: String,
        allowed: Vec<String>,
        value: String,
    },

    /// A path identifier is not a valid integer.
    #[error("invalid {entity} id: {value}")]
    InvalidId { entity: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// Unit Tests
// =============================================================================
