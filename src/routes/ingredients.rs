use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::ApiError,
    models::{
        auth::AuthenticatedUser,
        ingredient::{CreateIngredientRequest, Ingredient, IngredientCategory},
    },
    services::ingredients::IngredientService,
    AppState,
};

/// GET /ingredients — shared registry, name order
pub async fn list_ingredients(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<Ingredient>>, ApiError> {
    let ingredients = IngredientService::list(&state.db).await?;
    Ok(Json(ingredients))
}

/// POST /ingredients
pub async fn create_ingredient(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(body): Json<CreateIngredientRequest>,
) -> Result<(StatusCode, Json<Ingredient>), ApiError> {
    let ingredient = IngredientService::create(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// GET /ingredient-categories
pub async fn list_categories(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<IngredientCategory>>, ApiError> {
    let categories = IngredientService::list_categories(&state.db).await?;
    Ok(Json(categories))
}
