use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Pantry row joined with its ingredient's name and default unit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventoryItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub ingredient_unit: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub expiration_date: Option<NaiveDate>,
    pub low_stock_threshold: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateInventoryItemRequest {
    pub ingredient_id: Uuid,
    pub quantity: f64,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub expiration_date: Option<NaiveDate>,
    pub low_stock_threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInventoryItemRequest {
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub expiration_date: Option<NaiveDate>,
    pub low_stock_threshold: Option<f64>,
}
