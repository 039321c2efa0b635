//! Route table.
//!
//! ```text
//! GET    /products                       list products (filters, paging)
//! GET    /products/categories            list categories (filters, paging)
//! GET    /products/category/{category}   products of a category, by name
//! POST   /product                        create product          → 201
//! GET    /product/{id}                   one product
//! PUT    /product/{id}                   update product
//! DELETE /product/{id}                   delete product          → 204
//! POST   /category                       create category         → 201
//! GET    /category/{id}                  one category
//! PUT    /category/{id}                  rename category
//! DELETE /category/{id}                  delete category         → 200 {id}
//! GET    /health                         liveness                → 200/503
//! ```
//!
//! Every response, errors included, is `application/json`.

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{category, health, not_found, product};
use crate::AppState;

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/products", get(product::get_products))
        .route("/products/categories", get(category::get_categories))
        .route(
            "/products/category/{category}",
            get(product::get_products_by_category),
        )
        .route("/product", post(product::create_product))
        .route(
            "/product/{id}",
            get(product::find_product_by_id)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        .route("/category", post(category::create_category))
        .route(
            "/category/{id}",
            get(category::find_category_by_id)
                .put(category::update_category)
                .delete(category::delete_category),
        )
        .route("/health", get(health::health))
        .fallback(not_found)
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
