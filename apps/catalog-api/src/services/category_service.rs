//! Category service.
//!
//! Owns the transaction boundaries for category use cases and shapes their
//! DTOs.

use tracing::info;

use catalog_core::dto::{CategoryDto, CategoryListResponseDto, CategoryResponseDto};
use catalog_core::{AppResult, Metadata, SearchParams};
use catalog_db::{CategoryRepository, Database};

/// Category use cases.
#[derive(Debug, Clone)]
pub struct CategoryService {
    db: Database,
    categories: CategoryRepository,
}

impl CategoryService {
    /// Create a new category service.
    pub fn new(db: Database) -> Self {
        CategoryService {
            db,
            categories: CategoryRepository,
        }
    }

    /// Inserts a category and reads it back in the same transaction.
    ///
    /// An empty name is rejected before any database work.
    pub async fn create_category(&self, dto: CategoryDto) -> AppResult<CategoryResponseDto> {
        dto.validate()?;

        let repo = self.categories;
        let category = self
            .db
            .with_transaction(move |tx| {
                Box::pin(async move {
                    let id = repo.create(tx, &dto.name).await?;
                    repo.find_by_id(&mut **tx, id).await
                })
            })
            .await?;

        info!(id = category.id, name = %category.name, "Category created");
        Ok(category.into())
    }

    /// Lists one page of categories.
    pub async fn get_categories(&self, params: SearchParams) -> AppResult<CategoryListResponseDto> {
        let repo = self.categories;
        let query = params.clone();
        let (categories, total) = self
            .db
            .without_transaction(move |conn| {
                Box::pin(async move { repo.find_all(conn, &query).await })
            })
            .await?;

        let data: Vec<CategoryResponseDto> =
            categories.into_iter().map(CategoryResponseDto::from).collect();
        let metadata = Metadata::new(total, &params, data.len());

        Ok(CategoryListResponseDto { data, metadata })
    }

    /// Gets one category.
    pub async fn find_category_by_id(&self, id: i64) -> AppResult<CategoryResponseDto> {
        let repo = self.categories;
        let category = self
            .db
            .without_transaction(move |conn| Box::pin(async move { repo.find_by_id(conn, id).await }))
            .await?;

        Ok(category.into())
    }

    /// Renames a category.
    pub async fn update_category(&self, id: i64, dto: CategoryDto) -> AppResult<CategoryResponseDto> {
        dto.validate()?;

        let repo = self.categories;
        let updated = self
            .db
            .with_transaction(move |tx| {
                Box::pin(async move {
                    let current = repo.find_by_id(&mut **tx, id).await?;
                    repo.update(tx, current.id, &dto.name).await?;
                    Ok(CategoryResponseDto {
                        id: current.id,
                        name: dto.name,
                    })
                })
            })
            .await?;

        info!(id, name = %updated.name, "Category updated");
        Ok(updated)
    }

    /// Deletes a category and returns its id.
    pub async fn delete_category(&self, id: i64) -> AppResult<i64> {
        let repo = self.categories;
        self.db
            .with_transaction(move |tx| Box::pin(async move { repo.delete(tx, id).await }))
            .await?;

        info!(id, "Category deleted");
        Ok(id)
    }
}
