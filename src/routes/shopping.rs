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
        shopping::{
            CreateShoppingItemRequest, CreateShoppingListRequest, ShoppingList, ShoppingListItem,
            UpdateShoppingItemRequest,
        },
    },
    services::shopping::ShoppingService,
    AppState,
};

/// GET /shopping-lists — own lists plus shared ones
pub async fn list_lists(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<ShoppingList>>, ApiError> {
    let lists = ShoppingService::list_lists(&state.db, user.user_id).await?;
    Ok(Json(lists))
}

/// POST /shopping-lists
pub async fn create_list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateShoppingListRequest>,
) -> Result<(StatusCode, Json<ShoppingList>), ApiError> {
    let list = ShoppingService::create_list(&state.db, user.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// DELETE /shopping-lists/{id} — owner only, items cascade
pub async fn delete_list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ShoppingService::delete_list(&state.db, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /shopping-lists/{id}/items
pub async fn list_items(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ShoppingListItem>>, ApiError> {
    let items = ShoppingService::list_items(&state.db, user.user_id, id).await?;
    Ok(Json(items))
}

/// POST /shopping-lists/{id}/items
pub async fn add_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<CreateShoppingItemRequest>,
) -> Result<(StatusCode, Json<ShoppingListItem>), ApiError> {
    let item = ShoppingService::add_item(&state.db, user.user_id, id, &body).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /shopping-items/{id} — check off / adjust
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateShoppingItemRequest>,
) -> Result<Json<ShoppingListItem>, ApiError> {
    let item = ShoppingService::update_item(&state.db, user.user_id, id, &body).await?;
    Ok(Json(item))
}

/// DELETE /shopping-items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ShoppingService::delete_item(&state.db, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
