//! # Transaction Coordinator
//!
//! Runs a unit of work either inside a database transaction or on a plain
//! pooled connection.
//!
//! ## Outcomes of `with_transaction`
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  work(&mut tx) under operation_timeout                                  │
//! │    │                                                                    │
//! │    ├── Ok(value)  ──► COMMIT ──► Ok(value)   (commit failure → Err)     │
//! │    ├── Err(e)     ──► ROLLBACK ──► Err(e)                               │
//! │    ├── panic      ──► ROLLBACK ──► resume the panic                     │
//! │    └── timed out  ──► ROLLBACK ──► Err(Internal)                        │
//! │                                                                         │
//! │  Exactly one of COMMIT / ROLLBACK per call.                             │
//! │  A dropped caller future drops the transaction; sqlx rolls it back.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let id = db
//!     .with_transaction(move |tx| {
//!         Box::pin(async move { CategoryRepository.create(tx, &name).await })
//!     })
//!     .await?;
//! ```
//!
//! The closure receives a borrowed handle, so it must return a boxed future
//! tied to that borrow. Anything the work needs is moved in.

use std::panic::AssertUnwindSafe;

use futures::future::BoxFuture;
use futures::FutureExt;
use sqlx::{Sqlite, SqliteConnection, Transaction};
use tracing::{debug, debug_span, error, Instrument};

use catalog_core::{AppError, AppResult};

use crate::error::SqlxResultExt;
use crate::pool::Database;

/// Transaction handle passed to units of work.
pub type Tx = Transaction<'static, Sqlite>;

impl Database {
    /// Runs `work` inside a transaction.
    ///
    /// Commits when the work returns `Ok`, rolls back on `Err`, on panic (the
    /// panic is then resumed) and on timeout.
    pub async fn with_transaction<T, F>(&self, work: F) -> AppResult<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut Tx) -> BoxFuture<'c, AppResult<T>> + Send,
    {
        let span = debug_span!("db.with_transaction");
        async move {
            let mut tx = self
                .pool()
                .begin()
                .await
                .internal("failed to begin transaction")?;
            debug!("transaction started");

            let outcome = {
                let unit = AssertUnwindSafe(work(&mut tx)).catch_unwind();
                tokio::time::timeout(self.operation_timeout, unit).await
            };

            match outcome {
                Ok(Ok(Ok(value))) => {
                    tx.commit().await.internal("failed to commit transaction")?;
                    debug!("transaction committed");
                    Ok(value)
                }
                Ok(Ok(Err(err))) => {
                    debug!(error = %err, "unit of work failed");
                    rollback(tx).await;
                    Err(err)
                }
                Ok(Err(panic)) => {
                    error!("unit of work panicked, rolling back");
                    rollback(tx).await;
                    std::panic::resume_unwind(panic)
                }
                Err(elapsed) => {
                    error!(timeout = ?self.operation_timeout, "transaction timed out");
                    rollback(tx).await;
                    Err(AppError::internal("database operation timed out", elapsed))
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Runs `work` on a pooled connection without a transaction.
    ///
    /// Meant for pure reads.
    pub async fn without_transaction<T, F>(&self, work: F) -> AppResult<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, AppResult<T>> + Send,
    {
        let span = debug_span!("db.without_transaction");
        async move {
            let mut conn = self
                .pool()
                .acquire()
                .await
                .internal("failed to acquire database connection")?;
            debug!("connection acquired");

            match tokio::time::timeout(self.operation_timeout, work(&mut *conn)).await {
                Ok(result) => result,
                Err(elapsed) => {
                    error!(timeout = ?self.operation_timeout, "query timed out");
                    Err(AppError::internal("database operation timed out", elapsed))
                }
            }
        }
        .instrument(span)
        .await
    }
}

async fn rollback(tx: Tx) {
    match tx.rollback().await {
        Ok(()) => debug!("transaction rolled back"),
        Err(e) => error!(error = %e, "failed to roll back transaction"),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::DbConfig;
    use catalog_core::ErrorKind;

    async fn insert_category(tx: &mut Tx, name: &str) -> AppResult<()> {
        sqlx::query("INSERT INTO categories (name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(chrono::Utc::now())
            .execute(&mut **tx)
            .await
            .internal("insert failed")?;
        Ok(())
    }

    async fn category_count(db: &Database) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_commit_on_success() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let value = db
            .with_transaction(|tx| {
                Box::pin(async move {
                    insert_category(tx, "Books").await?;
                    Ok(7)
                })
            })
            .await
            .unwrap();

        assert_eq!(value, 7);
        assert_eq!(category_count(&db).await, 1);
    }

    #[tokio::test]
    async fn test_rollback_on_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .with_transaction(|tx| {
                Box::pin(async move {
                    insert_category(tx, "Books").await?;
                    Err::<(), _>(AppError::bad_request("changed my mind"))
                })
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(category_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_rollback_on_panic_then_resume() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let explode = true;
        let result = AssertUnwindSafe(db.with_transaction::<(), _>(move |tx| {
            Box::pin(async move {
                insert_category(tx, "Books").await?;
                if explode {
                    panic!("boom");
                }
                Ok(())
            })
        }))
        .catch_unwind()
        .await;

        assert!(result.is_err(), "panic should propagate to the caller");
        assert_eq!(category_count(&db).await, 0);
        // The pool's only connection came back usable
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_rollback_on_timeout() {
        let db = Database::new(DbConfig::in_memory().operation_timeout(Duration::from_millis(50)))
            .await
            .unwrap();

        let err = db
            .with_transaction::<(), _>(|tx| {
                Box::pin(async move {
                    insert_category(tx, "Books").await?;
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok(())
                })
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.message(), "database operation timed out");
        assert_eq!(category_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_without_transaction_reads() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let one: i64 = db
            .without_transaction(|conn| {
                Box::pin(async move {
                    sqlx::query_scalar("SELECT 1")
                        .fetch_one(&mut *conn)
                        .await
                        .internal("select failed")
                })
            })
            .await
            .unwrap();

        assert_eq!(one, 1);
    }

    #[tokio::test]
    async fn test_closed_pool_is_internal() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        let err = db
            .with_transaction::<(), _>(|_tx| Box::pin(async move { Ok(()) }))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
