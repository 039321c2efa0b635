//! # Product Repository
//!
//! SQL for the `products` table.
//!
//! ## Key Operations
//! - Filtered, sorted, paginated listing through the search query builder
//! - Lookup by id and by owning category
//! - Insert, update, delete inside a caller-owned transaction
//!
//! ## Not-Found Rules
//! ```text
//! ┌──────────────────────┬────────────────────────────────────────────────┐
//! │ find_all             │ empty page            → NotFound               │
//! │ find_by_id           │ no row                → NotFound               │
//! │ find_by_category     │ no rows               → NotFound               │
//! │ update               │ 0 rows affected       → NotFound               │
//! │ delete               │ 0 rows affected       → Internal               │
//! └──────────────────────┴────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{Sqlite, SqliteConnection, Transaction};
use tracing::debug;

use catalog_core::{AppError, AppResult, ErrorKind, Product, ProductFields, SearchParams};

use crate::error::SqlxResultExt;
use crate::query::{build_search_query, SearchTarget};

const SELECT_PRODUCT: &str =
    "SELECT id, title, description, price, image, category_id, created_at FROM products";

/// Repository for product database operations.
///
/// Stateless; the connection comes from the caller's unit of work.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductRepository;

impl ProductRepository {
    /// Inserts a product and returns its generated id.
    ///
    /// A `category_id` that references no category fails on the foreign key
    /// and surfaces as Internal.
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        fields: &ProductFields,
    ) -> AppResult<i64> {
        debug!(title = %fields.title, category_id = fields.category_id, "Inserting product");

        let result = sqlx::query(
            "INSERT INTO products (title, description, price, image, category_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(&fields.image)
        .bind(fields.category_id)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await
        .internal("fail to insert product")?;

        Ok(result.last_insert_rowid())
    }

    /// Counts every product, ignoring filters.
    pub async fn count(&self, conn: &mut SqliteConnection) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(conn)
            .await
            .internal("fail to count products")
    }

    /// Returns one page of products plus the unfiltered table total.
    ///
    /// ## Errors
    /// * NotFound - the page is empty
    /// * Internal - count, query or row mapping failed
    pub async fn find_all(
        &self,
        conn: &mut SqliteConnection,
        params: &SearchParams,
    ) -> AppResult<(Vec<Product>, i64)> {
        let total = self.count(&mut *conn).await?;

        let query = build_search_query(SearchTarget::Products, params);
        debug!(sql = %query.sql, args = query.args.len(), "Listing products");

        let products: Vec<Product> = query
            .fetch_all(conn)
            .await
            .internal("fail to execute query")?;

        if products.is_empty() {
            return Err(AppError::not_found("product not found"));
        }

        debug!(count = products.len(), total, "Products listed");
        Ok((products, total))
    }

    /// Gets a product by id.
    pub async fn find_by_id(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<Product> {
        debug!(id, "Finding product by id");

        sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE id = ?"))
            .bind(id)
            .fetch_one(conn)
            .await
            .not_found_or_internal(
                || format!("product with ID {id} not found"),
                "fail to find product",
            )
    }

    /// Lists every product in a category, oldest first.
    pub async fn find_by_category(
        &self,
        conn: &mut SqliteConnection,
        category_id: i64,
    ) -> AppResult<Vec<Product>> {
        debug!(category_id, "Finding products by category");

        let products = sqlx::query_as::<_, Product>(&format!(
            "{SELECT_PRODUCT} WHERE category_id = ? ORDER BY id"
        ))
        .bind(category_id)
        .fetch_all(conn)
        .await
        .internal("fail to get products by category")?;

        if products.is_empty() {
            return Err(AppError::not_found(format!(
                "product with category ID {category_id} not found"
            )));
        }

        Ok(products)
    }

    /// Overwrites every mutable column of product `id`. Returns the affected
    /// row count.
    pub async fn update(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
        fields: &ProductFields,
    ) -> AppResult<u64> {
        debug!(id, title = %fields.title, "Updating product");

        let result = sqlx::query(
            "UPDATE products SET title = ?, description = ?, price = ?, image = ?, category_id = ? \
             WHERE id = ?",
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(&fields.image)
        .bind(fields.category_id)
        .bind(id)
        .execute(&mut **tx)
        .await
        .internal("fail to update product")?;

        match result.rows_affected() {
            0 => Err(AppError::not_found(format!("product with ID {id} not found"))),
            n => Ok(n),
        }
    }

    /// Deletes a product. Returns the affected row count.
    ///
    /// Deleting nothing is an Internal error.
    pub async fn delete(&self, tx: &mut Transaction<'_, Sqlite>, id: i64) -> AppResult<u64> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await
            .internal("fail to delete product")?;

        match result.rows_affected() {
            0 => Err(AppError::new(
                ErrorKind::Internal,
                format!("fail to delete product with ID {id}: no rows affected"),
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
    use crate::repository::category::CategoryRepository;
    use crate::{Database, DbConfig};
    use catalog_core::SortDirection;

    fn fields(title: &str, price: f64, category_id: i64) -> ProductFields {
        ProductFields {
            title: title.to_string(),
            description: format!("{title} description"),
            price,
            image: format!("https://img.example/{title}.jpg"),
            category_id,
        }
    }

    /// Creates a category and the given products in it; returns
    /// `(category_id, product_ids)`.
    async fn seed(db: &Database, products: Vec<(&'static str, f64)>) -> (i64, Vec<i64>) {
        db.with_transaction(move |tx| {
            Box::pin(async move {
                let category_id = CategoryRepository.create(tx, "Footwear").await?;
                let mut ids = Vec::new();
                for (title, price) in products {
                    ids.push(
                        ProductRepository
                            .create(tx, &fields(title, price, category_id))
                            .await?,
                    );
                }
                Ok((category_id, ids))
            })
        })
        .await
        .unwrap()
    }

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_find_by_id_returns_exact_fields() {
        let db = setup().await;
        let (category_id, ids) = seed(&db, vec![("Trail", 89.5)]).await;
        let id = ids[0];

        let product = db
            .without_transaction(move |conn| {
                Box::pin(async move { ProductRepository.find_by_id(conn, id).await })
            })
            .await
            .unwrap();

        assert_eq!(ProductFields::from(&product), fields("Trail", 89.5, category_id));
        assert_eq!(product.id, id);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let db = setup().await;

        let err = db
            .without_transaction(|conn| {
                Box::pin(async move { ProductRepository.find_by_id(conn, 5).await })
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "product with ID 5 not found");
    }

    #[tokio::test]
    async fn test_find_all_empty_table_is_not_found() {
        let db = setup().await;
        let params = SearchParams::default().with_defaults(100);

        let err = db
            .without_transaction(move |conn| {
                Box::pin(async move { ProductRepository.find_all(conn, &params).await })
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "product not found");
    }

    #[tokio::test]
    async fn test_find_all_total_ignores_filters() {
        let db = setup().await;
        seed(&db, vec![("Trail", 90.0), ("Road", 70.0), ("Sandal", 20.0)]).await;

        let params = SearchParams {
            title: Some("road".to_string()),
            ..SearchParams::default()
        }
        .with_defaults(100);

        let (products, total) = db
            .without_transaction(move |conn| {
                Box::pin(async move { ProductRepository.find_all(conn, &params).await })
            })
            .await
            .unwrap();

        assert_eq!(total, 3);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Road");
    }

    #[tokio::test]
    async fn test_find_all_price_range_and_sort() {
        let db = setup().await;
        seed(&db, vec![("Trail", 90.0), ("Road", 70.0), ("Sandal", 20.0)]).await;

        let params = SearchParams {
            sort: Some(SortDirection::Asc),
            min: Some(50.0),
            max: Some(100.0),
            ..SearchParams::default()
        }
        .with_defaults(100);

        let (products, _) = db
            .without_transaction(move |conn| {
                Box::pin(async move { ProductRepository.find_all(conn, &params).await })
            })
            .await
            .unwrap();

        let titles: Vec<_> = products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Road", "Trail"]);
    }

    #[tokio::test]
    async fn test_find_by_category() {
        let db = setup().await;
        let (category_id, ids) = seed(&db, vec![("Trail", 90.0), ("Road", 70.0)]).await;

        let products = db
            .without_transaction(move |conn| {
                Box::pin(async move { ProductRepository.find_by_category(conn, category_id).await })
            })
            .await
            .unwrap();
        assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), ids);

        let err = db
            .without_transaction(|conn| {
                Box::pin(async move { ProductRepository.find_by_category(conn, 404).await })
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "product with category ID 404 not found");
    }

    #[tokio::test]
    async fn test_update_persists_and_missing_is_not_found() {
        let db = setup().await;
        let (category_id, ids) = seed(&db, vec![("Trail", 90.0)]).await;
        let id = ids[0];

        let affected = db
            .with_transaction(move |tx| {
                Box::pin(async move {
                    ProductRepository
                        .update(tx, id, &fields("Trail v2", 95.0, category_id))
                        .await
                })
            })
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let product = db
            .without_transaction(move |conn| {
                Box::pin(async move { ProductRepository.find_by_id(conn, id).await })
            })
            .await
            .unwrap();
        assert_eq!(product.title, "Trail v2");
        assert_eq!(product.price, 95.0);

        let err = db
            .with_transaction(move |tx| {
                Box::pin(async move {
                    ProductRepository
                        .update(tx, 999, &fields("Ghost", 1.0, category_id))
                        .await
                })
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_removes_one_row_then_errors() {
        let db = setup().await;
        let (_, ids) = seed(&db, vec![("Trail", 90.0), ("Road", 70.0)]).await;
        let id = ids[0];

        let affected = db
            .with_transaction(move |tx| {
                Box::pin(async move { ProductRepository.delete(tx, id).await })
            })
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let remaining = db
            .without_transaction(|conn| {
                Box::pin(async move { ProductRepository.count(conn).await })
            })
            .await
            .unwrap();
        assert_eq!(remaining, 1);

        let err = db
            .with_transaction(move |tx| {
                Box::pin(async move { ProductRepository.delete(tx, id).await })
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_unknown_category_id_violates_foreign_key() {
        let db = setup().await;

        let err = db
            .with_transaction(|tx| {
                Box::pin(async move {
                    ProductRepository.create(tx, &fields("Orphan", 1.0, 77)).await
                })
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_category_with_products_cannot_be_deleted() {
        let db = setup().await;
        let (category_id, _) = seed(&db, vec![("Trail", 90.0)]).await;

        let err = db
            .with_transaction(move |tx| {
                Box::pin(async move { CategoryRepository.delete(tx, category_id).await })
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(
            err.message(),
            format!("category with id {category_id} still has products")
        );
    }
}
