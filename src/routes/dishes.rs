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
        dish::{CreateDishRequest, DishResponse, FavoriteResponse, UpdateDishRequest},
    },
    services::dishes::DishService,
    AppState,
};

/// GET /dishes — public catalog, newest first
pub async fn list_dishes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<DishResponse>>, ApiError> {
    let dishes = DishService::list_public(&state.db, user.user_id).await?;
    Ok(Json(dishes))
}

/// GET /dishes/mine — the caller's own dishes, public or not
pub async fn list_my_dishes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<DishResponse>>, ApiError> {
    let dishes = DishService::list_mine(&state.db, user.user_id).await?;
    Ok(Json(dishes))
}

/// POST /dishes
pub async fn create_dish(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateDishRequest>,
) -> Result<(StatusCode, Json<DishResponse>), ApiError> {
    let dish = DishService::create(&state.db, user.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(dish)))
}

/// PUT /dishes/{id} — author only
pub async fn update_dish(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateDishRequest>,
) -> Result<Json<DishResponse>, ApiError> {
    let dish = DishService::update(&state.db, user.user_id, id, &body).await?;
    Ok(Json(dish))
}

/// DELETE /dishes/{id} — author only
pub async fn delete_dish(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    DishService::delete(&state.db, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /dishes/{id}/favorite — toggle, returns the new state
pub async fn toggle_favorite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<FavoriteResponse>, ApiError> {
    let is_favorite = DishService::toggle_favorite(&state.db, user.user_id, id).await?;
    Ok(Json(FavoriteResponse {
        dish_id: id,
        is_favorite,
    }))
}
