use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{
        auth::AuthenticatedUser,
        inventory::{CreateInventoryItemRequest, InventoryItem, UpdateInventoryItemRequest},
    },
    services::inventory::InventoryService,
    AppState,
};

/// GET /inventory — most recently touched first
pub async fn list_items(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    let items = InventoryService::list(&state.db, user.user_id).await?;
    Ok(Json(items))
}

/// GET /inventory/low-stock
pub async fn list_low_stock(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    let items = InventoryService::low_stock(&state.db, user.user_id).await?;
    Ok(Json(items))
}

/// POST /inventory
pub async fn create_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateInventoryItemRequest>,
) -> Result<(StatusCode, Json<InventoryItem>), ApiError> {
    let item = InventoryService::create(&state.db, user.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /inventory/{id}
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateInventoryItemRequest>,
) -> Result<Json<InventoryItem>, ApiError> {
    let item = InventoryService::update(&state.db, user.user_id, id, &body).await?;
    Ok(Json(item))
}

/// DELETE /inventory/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    InventoryService::delete(&state.db, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
