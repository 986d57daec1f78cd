use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Dish {
    pub id: Uuid,
    pub author_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub cooking_time_minutes: Option<i32>,
    pub servings: i32,
    pub is_public: bool,
    pub rating: Option<f64>,
    pub recipe_content: Option<String>,
    pub recipe_file_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One ingredient line of a dish, joined with the ingredient's name and unit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DishIngredient {
    pub id: Uuid,
    pub dish_id: Uuid,
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub quantity: f64,
    pub unit: Option<String>,
}

/// Catalog view of a dish: row + author + ingredient lines + caller's
/// favorite flag.
#[derive(Debug, Clone, Serialize)]
pub struct DishResponse {
    #[serde(flatten)]
    pub dish: Dish,
    pub author_username: Option<String>,
    pub is_favorite: bool,
    pub ingredients: Vec<DishIngredient>,
}

#[derive(Debug, Deserialize)]
pub struct DishIngredientInput {
    pub ingredient_id: Uuid,
    pub quantity: f64,
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDishRequest {
    pub name: String,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub cooking_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub is_public: Option<bool>,
    pub recipe_content: Option<String>,
    pub recipe_file_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<DishIngredientInput>,
}

/// Partial update — absent fields keep their current value. A present
/// `ingredients` list replaces all existing lines.
#[derive(Debug, Deserialize)]
pub struct UpdateDishRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub cooking_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub is_public: Option<bool>,
    pub recipe_content: Option<String>,
    pub recipe_file_url: Option<String>,
    pub ingredients: Option<Vec<DishIngredientInput>>,
}

/// Response of POST /dishes/{id}/favorite.
#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub dish_id: Uuid,
    pub is_favorite: bool,
}
