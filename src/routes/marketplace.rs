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
        marketplace::{
            ChatMessage, CreateChatMessageRequest, CreateMarketplaceItemRequest,
            CreateOrderRequest, MarketplaceItem, MarketplaceListing, Order,
            UpdateMarketplaceItemRequest,
        },
    },
    services::marketplace::MarketplaceService,
    AppState,
};

/// GET /marketplace — available listings, newest first
pub async fn list_listings(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<MarketplaceListing>>, ApiError> {
    let listings = MarketplaceService::list_available(&state.db).await?;
    Ok(Json(listings))
}

/// GET /marketplace/mine
pub async fn list_my_items(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<MarketplaceItem>>, ApiError> {
    let items = MarketplaceService::list_mine(&state.db, user.user_id).await?;
    Ok(Json(items))
}

/// POST /marketplace
pub async fn create_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateMarketplaceItemRequest>,
) -> Result<(StatusCode, Json<MarketplaceItem>), ApiError> {
    let item = MarketplaceService::create_item(&state.db, user.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /marketplace/{id} — seller only
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMarketplaceItemRequest>,
) -> Result<Json<MarketplaceItem>, ApiError> {
    let item = MarketplaceService::update_item(&state.db, user.user_id, id, &body).await?;
    Ok(Json(item))
}

/// DELETE /marketplace/{id} — seller only
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    MarketplaceService::delete_item(&state.db, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /orders — caller as buyer or seller
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = MarketplaceService::list_orders(&state.db, user.user_id).await?;
    Ok(Json(orders))
}

/// POST /orders
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = MarketplaceService::create_order(&state.db, user.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// POST /orders/{id}/confirm — buyer or seller records their confirmation
pub async fn confirm_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    let order = MarketplaceService::confirm_order(&state.db, user.user_id, id).await?;
    Ok(Json(order))
}

/// GET /orders/{id}/messages — participants only, ascending
pub async fn list_messages(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let messages = MarketplaceService::list_messages(&state.db, user.user_id, id).await?;
    Ok(Json(messages))
}

/// POST /orders/{id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<CreateChatMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), ApiError> {
    let message = MarketplaceService::send_message(&state.db, user.user_id, id, &body).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
