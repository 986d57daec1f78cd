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
        location::{CreateLocationRequest, UpdateLocationRequest, UserLocation},
    },
    services::locations::LocationService,
    AppState,
};

/// GET /locations — default address first
pub async fn list_locations(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<UserLocation>>, ApiError> {
    let locations = LocationService::list(&state.db, user.user_id).await?;
    Ok(Json(locations))
}

/// POST /locations
pub async fn create_location(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<UserLocation>), ApiError> {
    let location = LocationService::create(&state.db, user.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

/// PUT /locations/{id}
pub async fn update_location(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateLocationRequest>,
) -> Result<Json<UserLocation>, ApiError> {
    let location = LocationService::update(&state.db, user.user_id, id, &body).await?;
    Ok(Json(location))
}

/// DELETE /locations/{id}
pub async fn delete_location(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    LocationService::delete(&state.db, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
