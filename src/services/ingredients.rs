use sqlx::PgPool;

use crate::{
    error::ApiError,
    models::ingredient::{CreateIngredientRequest, Ingredient, IngredientCategory},
};

pub struct IngredientService;

impl IngredientService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Ingredient>, ApiError> {
        let ingredients =
            sqlx::query_as::<_, Ingredient>("SELECT * FROM ingredients ORDER BY name")
                .fetch_all(pool)
                .await?;
        Ok(ingredients)
    }

    pub async fn create(
        pool: &PgPool,
        req: &CreateIngredientRequest,
    ) -> Result<Ingredient, ApiError> {
        if req.name.trim().is_empty() {
            return Err(ApiError::validation("Le nom de l'ingrédient est requis"));
        }
        if req.price_per_unit.is_some_and(|p| p < 0.0) {
            return Err(ApiError::validation("Le prix ne peut pas être négatif"));
        }
        let ingredient = sqlx::query_as::<_, Ingredient>(
            "INSERT INTO ingredients (name, description, unit, price_per_unit, photo_url, category_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(req.name.trim())
        .bind(&req.description)
        .bind(&req.unit)
        .bind(req.price_per_unit)
        .bind(&req.photo_url)
        .bind(req.category_id)
        .fetch_one(pool)
        .await?;
        Ok(ingredient)
    }

    pub async fn list_categories(pool: &PgPool) -> Result<Vec<IngredientCategory>, ApiError> {
        let categories = sqlx::query_as::<_, IngredientCategory>(
            "SELECT id, name FROM ingredient_categories ORDER BY name",
        )
        .fetch_all(pool)
        .await?;
        Ok(categories)
    }
}
