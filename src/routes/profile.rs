use axum::{extract::State, Json};

use crate::{
    error::ApiError,
    models::{
        auth::AuthenticatedUser,
        profile::{Profile, ProfileStats, UpdateProfileRequest},
    },
    services::profiles::ProfileService,
    AppState,
};

/// GET /profile
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Profile>, ApiError> {
    let profile = ProfileService::get(&state.db, user.user_id).await?;
    Ok(Json(profile))
}

/// PUT /profile
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let profile = ProfileService::update(&state.db, user.user_id, &body).await?;
    Ok(Json(profile))
}

/// GET /profile/stats — dish / plan / sale / listing counts
pub async fn get_stats(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ProfileStats>, ApiError> {
    let stats = ProfileService::stats(&state.db, user.user_id).await?;
    Ok(Json(stats))
}
