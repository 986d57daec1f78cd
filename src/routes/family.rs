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
        family::{CreateFamilyMemberRequest, FamilyMember, UpdateFamilyMemberRequest},
    },
    services::family::FamilyService,
    AppState,
};

/// GET /family-members
pub async fn list_members(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<FamilyMember>>, ApiError> {
    let members = FamilyService::list(&state.db, user.user_id).await?;
    Ok(Json(members))
}

/// POST /family-members
pub async fn create_member(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateFamilyMemberRequest>,
) -> Result<(StatusCode, Json<FamilyMember>), ApiError> {
    let member = FamilyService::create(&state.db, user.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// PUT /family-members/{id}
pub async fn update_member(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateFamilyMemberRequest>,
) -> Result<Json<FamilyMember>, ApiError> {
    let member = FamilyService::update(&state.db, user.user_id, id, &body).await?;
    Ok(Json(member))
}

/// DELETE /family-members/{id}
pub async fn delete_member(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    FamilyService::delete(&state.db, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
