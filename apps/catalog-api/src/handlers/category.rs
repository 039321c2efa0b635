//! Category endpoints.

use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use catalog_core::dto::{CategoryDto, CategoryListResponseDto, CategoryResponseDto, DeletedResponse};

use super::params::{category_id, parse_search_params};
use crate::error::ApiResult;
use crate::AppState;

/// `GET /products/categories`
pub async fn get_categories(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Json<CategoryListResponseDto>> {
    let Query(raw) = query?;
    let params = parse_search_params(&raw, state.default_search_limit)?;
    Ok(Json(state.categories.get_categories(params).await?))
}

/// `GET /category/{id}`
pub async fn find_category_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CategoryResponseDto>> {
    let id = category_id(&id)?;
    Ok(Json(state.categories.find_category_by_id(id).await?))
}

/// `POST /category`
pub async fn create_category(
    State(state): State<AppState>,
    body: Result<Json<CategoryDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CategoryResponseDto>)> {
    let Json(dto) = body?;
    let created = state.categories.create_category(dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /category/{id}`
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<CategoryDto>, JsonRejection>,
) -> ApiResult<Json<CategoryResponseDto>> {
    let id = category_id(&id)?;
    let Json(dto) = body?;
    Ok(Json(state.categories.update_category(id, dto).await?))
}

/// `DELETE /category/{id}`
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    let id = category_id(&id)?;
    let id = state.categories.delete_category(id).await?;
    Ok(Json(DeletedResponse { id }))
}
