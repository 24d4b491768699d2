//! Handlers for the `/categories` resource.
//!
//! Validation runs before the service call on create and update; the
//! service owns transactions and caching. Request data is taken through the
//! [`crate::extract`] wrappers so malformed input gets the JSON error payload.

use axum::extract::{OriginalUri, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use catalog_core::category::CategoryDto;
use catalog_core::types::DbId;
use catalog_db::models::category::CategorySortField;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::query::{page_request, sort_order};
use crate::state::AppState;

/// Query parameters for listing categories.
#[derive(Debug, Deserialize)]
pub struct ListCategoriesParams {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Zero-based page index.
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// `field` or `field,asc|desc`.
    pub sort: Option<String>,
}

/// GET /categories?name=&page=&size=&sort=
pub async fn list_categories(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListCategoriesParams>,
) -> AppResult<impl IntoResponse> {
    let page = page_request(params.page, params.size)?;
    let sort = sort_order::<CategorySortField>(params.sort.as_deref())?;

    let categories = state
        .categories
        .find_all(params.name.as_deref(), page, sort)
        .await?;

    Ok(Json(categories))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = state.categories.find_by_id(id).await?;
    Ok(Json(category))
}

/// POST /categories
///
/// Responds 201 with a `Location` header pointing at the new category.
pub async fn create_category(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ApiJson(input): ApiJson<CategoryDto>,
) -> AppResult<impl IntoResponse> {
    state.categories.validate(&input).await?;
    let created = state.categories.create(&input).await?;

    let id = created
        .id
        .ok_or_else(|| AppError::InternalError("Created category has no id".into()))?;
    let location = format!("{}/{id}", uri.path().trim_end_matches('/'));

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// PUT /categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<CategoryDto>,
) -> AppResult<impl IntoResponse> {
    state.categories.validate(&input).await?;
    let updated = state.categories.update(id, &input).await?;
    Ok(Json(updated))
}

/// DELETE /categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    state.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
