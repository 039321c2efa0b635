//! # Transport DTOs
//!
//! JSON shapes accepted and returned by the HTTP layer.
//!
//! Entities carry a category id; DTOs carry the category *name*. Services do
//! the translation in both directions.
//!
//! ```text
//! POST /product  {title, description, price, image, category}
//!        │
//!        ▼  ProductDto::validate()
//!   category name ──FindByName──► category_id ──► Product row
//!        │
//!        ▼
//! 201    {id, title, description, price, image, category}
//! ```

use serde::{Deserialize, Serialize};

use crate::params::Metadata;
use crate::types::{Category, Product};
use crate::validation::{validate_non_negative, validate_required, ValidationResult};

// =============================================================================
// Product DTOs
// =============================================================================

/// Product as seen by clients, with its category resolved to a name.
///
/// Missing string fields deserialize as empty so they fail [`validate`]
/// with a field-specific message rather than a generic JSON error.
///
/// [`validate`]: ProductDto::validate
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    /// Category name.
    pub category: String,
}

impl ProductDto {
    /// Builds the client view of a stored product.
    pub fn from_product(product: Product, category_name: impl Into<String>) -> Self {
        ProductDto {
            id: Some(product.id),
            title: product.title,
            description: product.description,
            price: product.price,
            image: product.image,
            category: category_name.into(),
        }
    }

    /// Checks that every text field is present and the price is non-negative.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_product_fields(
            &self.title,
            &self.description,
            self.price,
            &self.image,
            &self.category,
        )
    }
}

/// Body of `PUT /product/{id}`.
///
/// `category` is required for symmetry with creation but an update never
/// moves a product to another category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductUpdateDto {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
}

impl ProductUpdateDto {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_product_fields(
            &self.title,
            &self.description,
            self.price,
            &self.image,
            &self.category,
        )
    }
}

fn validate_product_fields(
    title: &str,
    description: &str,
    price: f64,
    image: &str,
    category: &str,
) -> ValidationResult<()> {
    validate_required("title", title)?;
    validate_required("description", description)?;
    validate_non_negative("price", price)?;
    validate_required("image", image)?;
    validate_required("category", category)?;
    Ok(())
}

/// A page of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub data: Vec<ProductDto>,
    pub metadata: Metadata,
}

// =============================================================================
// Category DTOs
// =============================================================================

/// Body of `POST /category` and `PUT /category/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryDto {
    pub name: String,
}

impl CategoryDto {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("category name", &self.name)
    }
}

/// Category as seen by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponseDto {
    fn from(category: Category) -> Self {
        CategoryResponseDto {
            id: category.id,
            name: category.name,
        }
    }
}

/// A page of categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryListResponseDto {
    pub data: Vec<CategoryResponseDto>,
    pub metadata: Metadata,
}

/// Body returned by `DELETE /category/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
