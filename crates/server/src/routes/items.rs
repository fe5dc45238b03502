use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::item;
use service::{
    errors::ServiceError,
    item::domain::ItemFields,
    pagination::{Page, Pagination},
};

use crate::{errors::ApiError, state::AppState};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 0-based page index (default 0)
    pub page: Option<u64>,
    /// Page size (default 10)
    pub size: Option<u64>,
}

/// Body of create and update requests. Both fields are required; they are
/// optional here only so that a missing field yields a readable message.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ItemInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<bool>,
}

impl ItemInput {
    pub fn validate(self) -> Result<ItemFields, String> {
        let name = match self.name {
            Some(n) if !item::is_blank(&n) => n,
            _ => return Err("Name is required".into()),
        };
        let Some(status) = self.status else {
            return Err("Status is required".into());
        };
        Ok(ItemFields { name, status })
    }
}

/// Numeric ids past the store's key range cannot exist, so they are reported as missing.
fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i32, ApiError> {
    let Path(raw) = path.map_err(|e| ApiError::bad_request(format!("Invalid item id: {}", e.body_text())))?;
    i32::try_from(raw).map_err(|_| ApiError::not_found(format!("Item not found with id {raw}")))
}

#[utoipa::path(
    get, path = "/api/items", tag = "items",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of items", body = crate::openapi::ItemPageDoc),
        (status = 400, description = "Invalid page parameters", body = crate::errors::ErrorBody),
        (status = 500, description = "List failed", body = crate::errors::ErrorBody)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Page<item::Model>>, ApiError> {
    let Query(q) = query.map_err(|e| ApiError::bad_request(format!("Failed to fetch items: {}", e.body_text())))?;
    let pagination = Pagination::new(q.page.unwrap_or(0), q.size.unwrap_or(state.default_page_size));

    match state.items.list_items(pagination).await {
        Ok(page) => {
            info!(page = page.number, size = page.size, count = page.number_of_elements, "list items");
            Ok(Json(page))
        }
        Err(e @ ServiceError::Validation(_)) => Err(ApiError::bad_request(format!("Failed to fetch items: {e}"))),
        Err(e) => Err(ApiError::internal(format!("Failed to fetch items: {e}"))),
    }
}

#[utoipa::path(
    post, path = "/api/items", tag = "items",
    request_body = ItemInput,
    responses(
        (status = 201, description = "Item created", body = crate::openapi::ItemDoc),
        (status = 400, description = "Validation error or creation failure", body = crate::errors::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<(StatusCode, Json<item::Model>), ApiError> {
    let reject = |msg: String| ApiError::bad_request(format!("Error creating item: {msg}"));
    let Json(input) = payload.map_err(|e| reject(e.body_text()))?;
    let fields = input.validate().map_err(reject)?;

    match state.items.create_item(fields).await {
        Ok(m) => {
            info!(id = m.id, "created item");
            Ok((StatusCode::CREATED, Json(m)))
        }
        Err(e @ (ServiceError::ItemCreation(_) | ServiceError::Validation(_))) => Err(reject(e.to_string())),
        Err(e) => Err(ApiError::internal(format!("Error creating item: {e}"))),
    }
}

#[utoipa::path(
    get, path = "/api/items/{id}", tag = "items",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item found", body = crate::openapi::ItemDoc),
        (status = 404, description = "Item not found", body = crate::errors::ErrorBody)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<item::Model>, ApiError> {
    let id = path_id(path)?;
    match state.items.get_item(id).await {
        Ok(Some(m)) => Ok(Json(m)),
        Ok(None) => Err(ApiError::not_found(ServiceError::NotFound(id).to_string())),
        Err(e) => Err(ApiError::internal(format!("Failed to fetch item: {e}"))),
    }
}

#[utoipa::path(
    put, path = "/api/items/{id}", tag = "items",
    params(("id" = i64, Path, description = "Item id")),
    request_body = ItemInput,
    responses(
        (status = 200, description = "Item updated", body = crate::openapi::ItemDoc),
        (status = 400, description = "Invalid data", body = crate::errors::ErrorBody),
        (status = 404, description = "Item not found", body = crate::errors::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<Json<item::Model>, ApiError> {
    let reject = |msg: String| ApiError::bad_request(format!("Error updating item: {msg}"));
    let id = path_id(path)?;
    let Json(input) = payload.map_err(|e| reject(e.body_text()))?;
    let fields = input.validate().map_err(reject)?;

    match state.items.update_item(id, fields).await {
        Ok(m) => {
            info!(id = m.id, "updated item");
            Ok(Json(m))
        }
        Err(e @ ServiceError::NotFound(_)) => Err(ApiError::not_found(e.to_string())),
        Err(e) => Err(reject(e.to_string())),
    }
}

#[utoipa::path(
    delete, path = "/api/items/{id}", tag = "items",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 400, description = "Delete failed", body = crate::errors::ErrorBody),
        (status = 404, description = "Item not found", body = crate::errors::ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(path)?;
    match state.items.delete_item(id).await {
        Ok(()) => {
            info!(id, "deleted item");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e @ ServiceError::NotFound(_)) => Err(ApiError::not_found(e.to_string())),
        Err(e) => Err(ApiError::bad_request(format!("Error deleting item: {e}"))),
    }
}
