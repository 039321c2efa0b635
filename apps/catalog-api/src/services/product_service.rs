//! Product service.
//!
//! Products are stored with a category id but exposed with the category
//! name, so most use cases touch both repositories.
//!
//! ```text
//! get_products          find_all ──► per row: category find_by_id (N+1)
//! find_product_by_id    find_by_id ──► category find_by_id
//! create_product        category find_by_name ──► insert          (tx)
//! get_by_category       category find_by_name ──► find_by_category
//! update_product        find_by_id ──► category find_by_id ──► update (tx)
//! delete_product        delete                                     (tx)
//! ```

use sqlx::SqliteConnection;
use tracing::info;

use catalog_core::dto::{ProductDto, ProductResponse, ProductUpdateDto};
use catalog_core::{AppResult, Category, Metadata, Product, ProductFields, SearchParams};
use catalog_db::{CategoryRepository, Database, ProductRepository};

/// Product use cases.
#[derive(Debug, Clone)]
pub struct ProductService {
    db: Database,
    products: ProductRepository,
    categories: CategoryRepository,
}

impl ProductService {
    /// Create a new product service.
    pub fn new(db: Database) -> Self {
        ProductService {
            db,
            products: ProductRepository,
            categories: CategoryRepository,
        }
    }

    /// Lists one page of products with their category names.
    pub async fn get_products(&self, params: SearchParams) -> AppResult<ProductResponse> {
        let (products, categories) = (self.products, self.categories);
        let query = params.clone();

        let (data, total) = self
            .db
            .without_transaction(move |conn| {
                Box::pin(async move {
                    let (rows, total) = products.find_all(&mut *conn, &query).await?;
                    let mut data = Vec::with_capacity(rows.len());
                    for product in rows {
                        let category = owning_category(categories, &mut *conn, &product).await?;
                        data.push(ProductDto::from_product(product, category.name));
                    }
                    Ok((data, total))
                })
            })
            .await?;

        let metadata = Metadata::new(total, &params, data.len());
        Ok(ProductResponse { data, metadata })
    }

    /// Gets one product with its category name.
    pub async fn find_product_by_id(&self, id: i64) -> AppResult<ProductDto> {
        let (products, categories) = (self.products, self.categories);

        self.db
            .without_transaction(move |conn| {
                Box::pin(async move {
                    let product = products.find_by_id(&mut *conn, id).await?;
                    let category = owning_category(categories, &mut *conn, &product).await?;
                    Ok(ProductDto::from_product(product, category.name))
                })
            })
            .await
    }

    /// Creates a product in the category whose name matches `dto.category`.
    ///
    /// Returns the request body with the generated id.
    pub async fn create_product(&self, dto: ProductDto) -> AppResult<ProductDto> {
        dto.validate()?;

        let (products, categories) = (self.products, self.categories);
        let created = self
            .db
            .with_transaction(move |tx| {
                Box::pin(async move {
                    let category = categories.find_by_name(&mut **tx, &dto.category).await?;
                    let fields = ProductFields {
                        title: dto.title.clone(),
                        description: dto.description.clone(),
                        price: dto.price,
                        image: dto.image.clone(),
                        category_id: category.id,
                    };
                    let id = products.create(tx, &fields).await?;
                    Ok(ProductDto { id: Some(id), ..dto })
                })
            })
            .await?;

        info!(id = ?created.id, title = %created.title, "Product created");
        Ok(created)
    }

    /// Lists every product of the category matching `category`.
    pub async fn get_products_by_category(&self, category: String) -> AppResult<Vec<ProductDto>> {
        let (products, categories) = (self.products, self.categories);

        self.db
            .without_transaction(move |conn| {
                Box::pin(async move {
                    let category = categories.find_by_name(&mut *conn, &category).await?;
                    let rows = products.find_by_category(&mut *conn, category.id).await?;
                    Ok(rows
                        .into_iter()
                        .map(|p| ProductDto::from_product(p, category.name.as_str()))
                        .collect())
                })
            })
            .await
    }

    /// Overwrites a product's fields. The product keeps its category.
    pub async fn update_product(&self, id: i64, dto: ProductUpdateDto) -> AppResult<ProductDto> {
        dto.validate()?;

        let (products, categories) = (self.products, self.categories);
        let updated = self
            .db
            .with_transaction(move |tx| {
                Box::pin(async move {
                    let current = products.find_by_id(&mut **tx, id).await?;
                    let category = owning_category(categories, &mut **tx, &current).await?;

                    let fields = ProductFields {
                        title: dto.title,
                        description: dto.description,
                        price: dto.price,
                        image: dto.image,
                        category_id: current.category_id,
                    };
                    products.update(tx, current.id, &fields).await?;

                    Ok(ProductDto {
                        id: Some(current.id),
                        title: fields.title,
                        description: fields.description,
                        price: fields.price,
                        image: fields.image,
                        category: category.name,
                    })
                })
            })
            .await?;

        info!(id, title = %updated.title, "Product updated");
        Ok(updated)
    }

    /// Deletes a product.
    pub async fn delete_product(&self, id: i64) -> AppResult<()> {
        let products = self.products;
        self.db
            .with_transaction(move |tx| Box::pin(async move { products.delete(tx, id).await }))
            .await?;

        info!(id, "Product deleted");
        Ok(())
    }
}

/// Resolves the category a stored product points at.
///
/// A miss here is broken referential integrity, not a bad lookup.
async fn owning_category(
    categories: CategoryRepository,
    conn: &mut SqliteConnection,
    product: &Product,
) -> AppResult<Category> {
    categories
        .find_by_id(conn, product.category_id)
        .await
        .map_err(|e| {
            e.not_found_as_internal(format!(
                "product {} references missing category {}",
                product.id, product.category_id
            ))
        })
}
