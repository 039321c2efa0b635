//! # sqlx Error Classification
//!
//! Repositories attach context to driver errors here rather than relying on
//! the generic `From<sqlx::Error>` conversion in catalog-core.
//!
//! ## Error Mapping
//! ```text
//! sqlx::Error::RowNotFound    → NotFound  (message names the lookup key)
//! sqlx::Error::Database       → Internal  (constraint violations included)
//! sqlx::Error::PoolTimedOut   → Internal
//! Other                       → Internal  (decode, I/O, closed pool)
//! ```

use catalog_core::{AppError, AppResult};

/// Context helpers for `Result<T, sqlx::Error>`.
pub trait SqlxResultExt<T> {
    /// Every failure becomes Internal with `message`; the driver error is
    /// kept as the cause.
    fn internal(self, message: &str) -> AppResult<T>;

    /// `RowNotFound` becomes NotFound with the lazily built message, every
    /// other failure becomes Internal with `message`.
    fn not_found_or_internal<F>(self, not_found: F, message: &str) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> SqlxResultExt<T> for Result<T, sqlx::Error> {
    fn internal(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::internal(message, e))
    }

    fn not_found_or_internal<F>(self, not_found: F, message: &str) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::not_found(not_found()).with_source(e),
            other => AppError::internal(message, other),
        })
    }
}

/// Whether a driver error is a foreign key violation.
///
/// SQLite reports these as `FOREIGN KEY constraint failed`.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.message().contains("FOREIGN KEY constraint failed"),
        _ => false,
    }
}
