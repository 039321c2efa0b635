//! Product endpoints.

use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use catalog_core::dto::{ProductDto, ProductResponse, ProductUpdateDto};

use super::params::{parse_search_params, product_id};
use crate::error::ApiResult;
use crate::AppState;

/// `GET /products`
pub async fn get_products(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Json<ProductResponse>> {
    let Query(raw) = query?;
    let params = parse_search_params(&raw, state.default_search_limit)?;
    Ok(Json(state.products.get_products(params).await?))
}

/// `GET /product/{id}`
pub async fn find_product_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductDto>> {
    let id = product_id(&id)?;
    Ok(Json(state.products.find_product_by_id(id).await?))
}

/// `GET /products/category/{category}`
pub async fn get_products_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Json<Vec<ProductDto>>> {
    Ok(Json(state.products.get_products_by_category(category).await?))
}

/// `POST /product`
pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<ProductDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProductDto>)> {
    let Json(dto) = body?;
    let created = state.products.create_product(dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /product/{id}`
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ProductUpdateDto>, JsonRejection>,
) -> ApiResult<Json<ProductDto>> {
    let id = product_id(&id)?;
    let Json(dto) = body?;
    Ok(Json(state.products.update_product(id, dto).await?))
}

/// `DELETE /product/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = product_id(&id)?;
    state.products.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
