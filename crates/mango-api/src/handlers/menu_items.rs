// ============================================================================
// Mango API - Menu Item Handlers
// File: crates/mango-api/src/handlers/menu_items.rs
// ============================================================================
//! Menu item HTTP handlers (list, get, create, update, delete)

use axum::{
    extract::{rejection::PathRejection, Multipart, Path, State},
    extract::multipart::MultipartRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use mango_core::domain::MenuItem;
use tracing::info;

use crate::dto::MenuItemForm;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

pub const MENU_ITEMS_PATH: &str = "/menu-items";

fn path_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::bad_request("Invalid ID."))
}

fn multipart(form: Result<Multipart, MultipartRejection>) -> Result<Multipart, ApiError> {
    form.map_err(|e| ApiError::bad_request(format!("Expected a multipart form: {}", e)))
}

/// List handler - GET /menu-items
pub async fn list_menu_items(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<MenuItem>>, ApiError> {
    let items = state.menu_items.list().await?;
    Ok(ApiResponse::ok(items))
}

/// Get handler - GET /menu-items/{id}
pub async fn get_menu_item(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<MenuItem>, ApiError> {
    let id = path_id(id)?;
    let item = state.menu_items.get(id).await?;
    Ok(ApiResponse::ok(item))
}

/// Create handler - POST /menu-items (multipart)
pub async fn create_menu_item(
    State(state): State<AppState>,
    form: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let form = MenuItemForm::from_multipart(multipart(form)?).await?;
    info!("Create menu item request: {}", form.fields.name);

    let created = state.menu_items.create(form.fields, form.file).await?;
    let location = format!("{}/{}", MENU_ITEMS_PATH, created.id);

    Ok((
        [(header::LOCATION, location)],
        ApiResponse::success(StatusCode::CREATED, created),
    )
        .into_response())
}

/// Update handler - PUT /menu-items/{id} (multipart, file optional)
pub async fn update_menu_item(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    form: Result<Multipart, MultipartRejection>,
) -> Result<ApiResponse<MenuItem>, ApiError> {
    let id = path_id(id)?;
    let form = MenuItemForm::from_multipart(multipart(form)?).await?;
    info!("Update menu item request: {}", id);

    let updated = state
        .menu_items
        .update(id, form.id, form.fields, form.file)
        .await
        .map_err(|e| ApiError::from(e).not_found_as_bad_request())?;
    Ok(ApiResponse::ok(updated))
}

/// Delete handler - DELETE /menu-items/{id}
pub async fn delete_menu_item(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<String>, ApiError> {
    let id = path_id(id)?;
    info!("Delete menu item request: {}", id);

    let message = state
        .menu_items
        .delete(id)
        .await
        .map_err(|e| ApiError::from(e).not_found_as_bad_request())?;
    Ok(ApiResponse::ok(message))
}
