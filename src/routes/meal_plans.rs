use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{
        auth::AuthenticatedUser,
        plan::{CreateMealPlanRequest, GridQuery, MealPlan, PlanRangeQuery},
    },
    planner::{DateRange, Grid, PlanStatistics},
    services::meal_plans::MealPlanService,
    AppState,
};

/// GET /meal-plans?start=YYYY-MM-DD&end=YYYY-MM-DD
pub async fn list_plans(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<PlanRangeQuery>,
) -> Result<Json<Vec<MealPlan>>, ApiError> {
    let range = DateRange::new(params.start, params.end)?;
    let entries = MealPlanService::list(&state.db, user.user_id, &range).await?;
    Ok(Json(entries))
}

/// GET /meal-plans/grid?start&end[&meal_types=breakfast,dinner]
pub async fn get_grid(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<GridQuery>,
) -> Result<Json<Grid>, ApiError> {
    let range = DateRange::new(params.start, params.end)?;
    let filter = MealPlanService::parse_meal_filter(params.meal_types.as_deref())?;
    let grid = MealPlanService::grid(&state.db, user.user_id, &range, filter.as_ref()).await?;
    Ok(Json(grid))
}

/// GET /meal-plans/stats?start&end
pub async fn get_statistics(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<PlanRangeQuery>,
) -> Result<Json<PlanStatistics>, ApiError> {
    let range = DateRange::new(params.start, params.end)?;
    let stats = MealPlanService::statistics(&state.db, user.user_id, &range).await?;
    Ok(Json(stats))
}

/// GET /meal-plans/export?start&end[&meal_types=...] — CSV attachment
pub async fn export_grid(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<GridQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let range = DateRange::new(params.start, params.end)?;
    let filter = MealPlanService::parse_meal_filter(params.meal_types.as_deref())?;
    let csv =
        MealPlanService::export_csv(&state.db, user.user_id, &range, filter.as_ref()).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"planning.csv\"",
            ),
        ],
        csv,
    ))
}

/// POST /meal-plans — not idempotent, duplicates stack
pub async fn create_plan(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateMealPlanRequest>,
) -> Result<(StatusCode, Json<MealPlan>), ApiError> {
    let entry = MealPlanService::add_entry(&state.db, user.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /meal-plans/{id} — 404 when the entry is absent or not the caller's
pub async fn delete_plan(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    MealPlanService::remove_entry(&state.db, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
