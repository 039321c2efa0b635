//! # Category Repository
//!
//! SQL for the `categories` table.
//!
//! Writes take the transaction handle, reads take any connection so they can
//! run inside or outside a transaction (`&mut **tx` derefs to one).

use chrono::Utc;
use sqlx::{Sqlite, SqliteConnection, Transaction};
use tracing::debug;

use catalog_core::{AppError, AppResult, Category, ErrorKind, SearchParams};

use crate::error::{is_foreign_key_violation, SqlxResultExt};
use crate::query::{build_search_query, SearchTarget};

/// Repository for category database operations.
///
/// Stateless; the connection comes from the caller's unit of work.
///
/// ## Usage
/// ```rust,ignore
/// db.with_transaction(move |tx| Box::pin(async move {
///     let id = CategoryRepository.create(tx, "Shoes").await?;
///     CategoryRepository.find_by_id(&mut **tx, id).await
/// })).await?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryRepository;

impl CategoryRepository {
    /// Inserts a category and returns its generated id.
    pub async fn create(&self, tx: &mut Transaction<'_, Sqlite>, name: &str) -> AppResult<i64> {
        debug!(name = %name, "Inserting category");

        let result = sqlx::query("INSERT INTO categories (name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(Utc::now())
            .execute(&mut **tx)
            .await
            .internal("fail to insert category")?;

        Ok(result.last_insert_rowid())
    }

    /// Counts every category, ignoring filters.
    pub async fn count(&self, conn: &mut SqliteConnection) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(conn)
            .await
            .internal("fail to count categories")
    }

    /// Returns one page of categories plus the unfiltered table total.
    ///
    /// An empty page is an empty list, not an error.
    pub async fn find_all(
        &self,
        conn: &mut SqliteConnection,
        params: &SearchParams,
    ) -> AppResult<(Vec<Category>, i64)> {
        let total = self.count(&mut *conn).await?;

        let query = build_search_query(SearchTarget::Categories, params);
        debug!(sql = %query.sql, args = query.args.len(), "Listing categories");

        let categories: Vec<Category> = query
            .fetch_all(conn)
            .await
            .internal("fail to get categories from db")?;

        debug!(count = categories.len(), total, "Categories listed");
        Ok((categories, total))
    }

    /// Gets a category by id.
    pub async fn find_by_id(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<Category> {
        debug!(id, "Finding category by id");

        sqlx::query_as::<_, Category>("SELECT id, name, created_at FROM categories WHERE id = ?")
            .bind(id)
            .fetch_one(conn)
            .await
            .not_found_or_internal(
                || format!("category with id {id} not found"),
                "fail to find category",
            )
    }

    /// Gets the lowest-id category whose name contains `name`, ignoring case.
    pub async fn find_by_name(&self, conn: &mut SqliteConnection, name: &str) -> AppResult<Category> {
        debug!(name = %name, "Finding category by name");

        sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories \
             WHERE LOWER(name) LIKE LOWER(?) ORDER BY id LIMIT 1",
        )
        .bind(format!("%{name}%"))
        .fetch_one(conn)
        .await
        .not_found_or_internal(
            || format!("category with name {name} not found"),
            "fail to find category",
        )
    }

    /// Renames a category. Returns the affected row count.
    pub async fn update(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
        name: &str,
    ) -> AppResult<u64> {
        debug!(id, name = %name, "Updating category");

        let result = sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&mut **tx)
            .await
            .internal("fail to update category")?;

        match result.rows_affected() {
            0 => Err(AppError::not_found(format!("category with id {id} not found"))),
            n => Ok(n),
        }
    }

    /// Deletes a category. Returns the affected row count.
    ///
    /// Deleting nothing is an Internal error. Deleting a category that still
    /// owns products fails on the foreign key.
    pub async fn delete(&self, tx: &mut Transaction<'_, Sqlite>, id: i64) -> AppResult<u64> {
        debug!(id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::internal(format!("category with id {id} still has products"), e)
                } else {
                    AppError::internal("fail to delete category", e)
                }
            })?;

        match result.rows_affected() {
            0 => Err(AppError::new(
                ErrorKind::Internal,
                format!("fail to delete category with id {id}: no rows affected"),
            )),
            n => Ok(n),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use catalog_core::SortDirection;

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed(db: &Database, names: &'static [&'static str]) -> Vec<i64> {
        db.with_transaction(move |tx| {
            Box::pin(async move {
                let mut ids = Vec::new();
                for name in names {
                    ids.push(CategoryRepository.create(tx, name).await?);
                }
                Ok(ids)
            })
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_then_find_by_id() {
        let db = setup().await;
        let id = seed(&db, &["Shoes"]).await[0];

        let found = db
            .without_transaction(move |conn| {
                Box::pin(async move { CategoryRepository.find_by_id(conn, id).await })
            })
            .await
            .unwrap();

        assert_eq!(found.id, id);
        assert_eq!(found.name, "Shoes");
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_not_found() {
        let db = setup().await;

        let err = db
            .without_transaction(|conn| {
                Box::pin(async move { CategoryRepository.find_by_id(conn, 42).await })
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "category with id 42 not found");
    }

    #[tokio::test]
    async fn test_find_by_name_is_partial_case_insensitive_lowest_id() {
        let db = setup().await;
        let ids = seed(&db, &["Running Shoes", "Dress Shoes"]).await;

        let found = db
            .without_transaction(|conn| {
                Box::pin(async move { CategoryRepository.find_by_name(conn, "shoes").await })
            })
            .await
            .unwrap();
        assert_eq!(found.id, ids[0]);

        let err = db
            .without_transaction(|conn| {
                Box::pin(async move { CategoryRepository.find_by_name(conn, "Hats").await })
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "category with name Hats not found");
    }

    #[tokio::test]
    async fn test_find_all_total_ignores_filters() {
        let db = setup().await;
        seed(&db, &["Shoes", "Hats", "Bags"]).await;

        let params = SearchParams {
            name: Some("Hat".to_string()),
            ..SearchParams::default()
        }
        .with_defaults(100);

        let (categories, total) = db
            .without_transaction(move |conn| {
                Box::pin(async move { CategoryRepository.find_all(conn, &params).await })
            })
            .await
            .unwrap();

        assert_eq!(total, 3);
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Hats");
    }

    #[tokio::test]
    async fn test_find_all_empty_page_is_empty_list() {
        let db = setup().await;
        seed(&db, &["Shoes"]).await;

        let params = SearchParams {
            offset: Some(5),
            ..SearchParams::default()
        }
        .with_defaults(10);

        let (categories, total) = db
            .without_transaction(move |conn| {
                Box::pin(async move { CategoryRepository.find_all(conn, &params).await })
            })
            .await
            .unwrap();

        assert!(categories.is_empty());
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_find_all_sort_and_paging() {
        let db = setup().await;
        seed(&db, &["Charlie", "Alpha", "Bravo"]).await;

        let params = SearchParams {
            sort: Some(SortDirection::Asc),
            limit: Some(2),
            offset: Some(2),
            ..SearchParams::default()
        };

        let (categories, _) = db
            .without_transaction(move |conn| {
                Box::pin(async move { CategoryRepository.find_all(conn, &params).await })
            })
            .await
            .unwrap();

        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Charlie"]);
    }

    #[tokio::test]
    async fn test_update_existing_and_missing() {
        let db = setup().await;
        let ids = seed(&db, &["Shoes"]).await;
        let id = ids[0];

        let affected = db
            .with_transaction(move |tx| {
                Box::pin(async move { CategoryRepository.update(tx, id, "Footwear").await })
            })
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let renamed = db
            .without_transaction(move |conn| {
                Box::pin(async move { CategoryRepository.find_by_id(conn, id).await })
            })
            .await
            .unwrap();
        assert_eq!(renamed.name, "Footwear");

        let err = db
            .with_transaction(|tx| {
                Box::pin(async move { CategoryRepository.update(tx, 999, "Nope").await })
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_existing_and_missing() {
        let db = setup().await;
        let ids = seed(&db, &["Shoes"]).await;
        let id = ids[0];

        let affected = db
            .with_transaction(move |tx| {
                Box::pin(async move { CategoryRepository.delete(tx, id).await })
            })
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let err = db
            .with_transaction(move |tx| {
                Box::pin(async move { CategoryRepository.delete(tx, id).await })
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
