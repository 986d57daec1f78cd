use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MarketplaceItem {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub ingredient_id: Uuid,
    pub quantity: f64,
    pub price_per_unit: f64,
    pub description: Option<String>,
    pub location: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public listing view: item joined with ingredient and seller display data.
/// The joins are LEFT + COALESCE so a listing survives a deleted ingredient
/// or an absent profile row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MarketplaceListing {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub seller_username: String,
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub ingredient_photo_url: Option<String>,
    pub quantity: f64,
    pub price_per_unit: f64,
    pub description: Option<String>,
    pub location: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

/// Two-party confirmation flow: pending until a first confirmation,
/// in_progress until the second, then completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "in_progress" => Ok(OrderStatus::InProgress),
            "completed" => Ok(OrderStatus::Completed),
            _ => Err(anyhow::anyhow!("Unknown order status: {s}")),
        }
    }
}

/// DB row struct — status is fetched as TEXT like the other TEXT-backed enums.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub marketplace_item_id: Uuid,
    pub quantity: f64,
    pub total_price: f64,
    pub delivery_address: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub delivery_time: Option<String>,
    pub status: String,
    pub buyer_confirmed: bool,
    pub seller_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    pub id: Uuid,
    pub order_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMarketplaceItemRequest {
    pub ingredient_id: Uuid,
    pub quantity: f64,
    pub price_per_unit: f64,
    pub description: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMarketplaceItemRequest {
    pub quantity: Option<f64>,
    pub price_per_unit: Option<f64>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub is_available: Option<bool>,
}

/// Body for POST /orders — the total price is computed server-side from the
/// listing, never taken from the client.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub marketplace_item_id: Uuid,
    pub quantity: f64,
    pub delivery_address: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub delivery_time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateChatMessageRequest {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_round_trips_through_text() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::InProgress,
            OrderStatus::Completed,
        ] {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("cancelled".parse::<OrderStatus>().is_err());
    }
}
