use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::inventory::{CreateInventoryItemRequest, InventoryItem, UpdateInventoryItemRequest},
};

const SELECT_JOINED: &str = "SELECT inv.*, i.name AS ingredient_name, i.unit AS ingredient_unit
     FROM inventory inv
     JOIN ingredients i ON i.id = inv.ingredient_id";

pub struct InventoryService;

impl InventoryService {
    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<InventoryItem>, ApiError> {
        let items = sqlx::query_as::<_, InventoryItem>(&format!(
            "{SELECT_JOINED} WHERE inv.user_id = $1 ORDER BY inv.updated_at DESC"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(items)
    }

    /// Rows at or below their low-stock threshold (rows without a threshold
    /// are never low).
    pub async fn low_stock(pool: &PgPool, user_id: Uuid) -> Result<Vec<InventoryItem>, ApiError> {
        let items = sqlx::query_as::<_, InventoryItem>(&format!(
            "{SELECT_JOINED}
             WHERE inv.user_id = $1
               AND inv.low_stock_threshold IS NOT NULL
               AND inv.quantity <= inv.low_stock_threshold
             ORDER BY inv.quantity"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(items)
    }

    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        req: &CreateInventoryItemRequest,
    ) -> Result<InventoryItem, ApiError> {
        if req.quantity < 0.0 {
            return Err(ApiError::validation("La quantité ne peut pas être négative"));
        }
        let (id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO inventory (user_id, ingredient_id, quantity, unit, location,
                                    expiration_date, low_stock_threshold)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(user_id)
        .bind(req.ingredient_id)
        .bind(req.quantity)
        .bind(&req.unit)
        .bind(&req.location)
        .bind(req.expiration_date)
        .bind(req.low_stock_threshold)
        .fetch_one(pool)
        .await?;
        Self::fetch_one(pool, user_id, id).await
    }

    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        req: &UpdateInventoryItemRequest,
    ) -> Result<InventoryItem, ApiError> {
        if req.quantity.is_some_and(|q| q < 0.0) {
            return Err(ApiError::validation("La quantité ne peut pas être négative"));
        }
        let result = sqlx::query(
            "UPDATE inventory
             SET quantity            = COALESCE($1, quantity),
                 unit                = COALESCE($2, unit),
                 location            = COALESCE($3, location),
                 expiration_date     = COALESCE($4, expiration_date),
                 low_stock_threshold = COALESCE($5, low_stock_threshold),
                 updated_at          = NOW()
             WHERE id = $6 AND user_id = $7",
        )
        .bind(req.quantity)
        .bind(&req.unit)
        .bind(&req.location)
        .bind(req.expiration_date)
        .bind(req.low_stock_threshold)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Article d'inventaire introuvable"));
        }
        Self::fetch_one(pool, user_id, id).await
    }

    pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Article d'inventaire introuvable"));
        }
        Ok(())
    }

    async fn fetch_one(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<InventoryItem, ApiError> {
        let item = sqlx::query_as::<_, InventoryItem>(&format!(
            "{SELECT_JOINED} WHERE inv.id = $1 AND inv.user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(item)
    }
}
