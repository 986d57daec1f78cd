use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShoppingList {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub is_shared: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Line item joined with the ingredient's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShoppingListItem {
    pub id: Uuid,
    pub shopping_list_id: Uuid,
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub is_checked: bool,
    pub added_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateShoppingListRequest {
    pub name: String,
    pub is_shared: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateShoppingItemRequest {
    pub ingredient_id: Uuid,
    pub quantity: f64,
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateShoppingItemRequest {
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub is_checked: Option<bool>,
}
