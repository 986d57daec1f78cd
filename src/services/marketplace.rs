use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::marketplace::{
        ChatMessage, CreateChatMessageRequest, CreateMarketplaceItemRequest, CreateOrderRequest,
        MarketplaceItem, MarketplaceListing, Order, UpdateMarketplaceItemRequest,
    },
    services::metrics,
};

const SELECT_LISTING: &str = "SELECT m.id, m.seller_id,
            COALESCE(p.username, 'Vendeur inconnu')    AS seller_username,
            m.ingredient_id,
            COALESCE(i.name, 'Ingrédient inconnu')     AS ingredient_name,
            i.photo_url                                AS ingredient_photo_url,
            m.quantity, m.price_per_unit, m.description, m.location,
            m.is_available, m.created_at
     FROM marketplace_items m
     LEFT JOIN ingredients i ON i.id = m.ingredient_id
     LEFT JOIN profiles p ON p.id = m.seller_id";

pub struct MarketplaceService;

impl MarketplaceService {
    /// Available listings, newest first. Joins are LEFT + COALESCE so a
    /// listing still shows up when its ingredient or seller profile is gone.
    pub async fn list_available(pool: &PgPool) -> Result<Vec<MarketplaceListing>, ApiError> {
        let listings = sqlx::query_as::<_, MarketplaceListing>(&format!(
            "{SELECT_LISTING} WHERE m.is_available = TRUE ORDER BY m.created_at DESC"
        ))
        .fetch_all(pool)
        .await?;
        Ok(listings)
    }

    pub async fn list_mine(
        pool: &PgPool,
        seller_id: Uuid,
    ) -> Result<Vec<MarketplaceItem>, ApiError> {
        let items = sqlx::query_as::<_, MarketplaceItem>(
            "SELECT * FROM marketplace_items WHERE seller_id = $1 ORDER BY created_at DESC",
        )
        .bind(seller_id)
        .fetch_all(pool)
        .await?;
        Ok(items)
    }

    pub async fn create_item(
        pool: &PgPool,
        seller_id: Uuid,
        req: &CreateMarketplaceItemRequest,
    ) -> Result<MarketplaceItem, ApiError> {
        if req.quantity <= 0.0 {
            return Err(ApiError::validation("La quantité doit être positive"));
        }
        if req.price_per_unit < 0.0 {
            return Err(ApiError::validation("Le prix ne peut pas être négatif"));
        }
        let item = sqlx::query_as::<_, MarketplaceItem>(
            "INSERT INTO marketplace_items (seller_id, ingredient_id, quantity, price_per_unit,
                                            description, location)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(seller_id)
        .bind(req.ingredient_id)
        .bind(req.quantity)
        .bind(req.price_per_unit)
        .bind(&req.description)
        .bind(&req.location)
        .fetch_one(pool)
        .await?;
        Ok(item)
    }

    pub async fn update_item(
        pool: &PgPool,
        seller_id: Uuid,
        id: Uuid,
        req: &UpdateMarketplaceItemRequest,
    ) -> Result<MarketplaceItem, ApiError> {
        if req.quantity.is_some_and(|q| q <= 0.0) {
            return Err(ApiError::validation("La quantité doit être positive"));
        }
        if req.price_per_unit.is_some_and(|p| p < 0.0) {
            return Err(ApiError::validation("Le prix ne peut pas être négatif"));
        }
        let item = sqlx::query_as::<_, MarketplaceItem>(
            "UPDATE marketplace_items
             SET quantity       = COALESCE($1, quantity),
                 price_per_unit = COALESCE($2, price_per_unit),
                 description    = COALESCE($3, description),
                 location       = COALESCE($4, location),
                 is_available   = COALESCE($5, is_available),
                 updated_at     = NOW()
             WHERE id = $6 AND seller_id = $7
             RETURNING *",
        )
        .bind(req.quantity)
        .bind(req.price_per_unit)
        .bind(&req.description)
        .bind(&req.location)
        .bind(req.is_available)
        .bind(id)
        .bind(seller_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Annonce introuvable"))?;
        Ok(item)
    }

    pub async fn delete_item(pool: &PgPool, seller_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM marketplace_items WHERE id = $1 AND seller_id = $2")
            .bind(id)
            .bind(seller_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Annonce introuvable"));
        }
        Ok(())
    }

    /// Orders where the caller is buyer or seller, newest first.
    pub async fn list_orders(pool: &PgPool, user_id: Uuid) -> Result<Vec<Order>, ApiError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders
             WHERE buyer_id = $1 OR seller_id = $1
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(orders)
    }

    /// Place an order on an available listing. The total price is computed
    /// from the listing, never taken from the client.
    pub async fn create_order(
        pool: &PgPool,
        buyer_id: Uuid,
        req: &CreateOrderRequest,
    ) -> Result<Order, ApiError> {
        if req.quantity <= 0.0 {
            return Err(ApiError::validation("La quantité doit être positive"));
        }

        let item: Option<(Uuid, f64, f64)> = sqlx::query_as(
            "SELECT seller_id, quantity, price_per_unit
             FROM marketplace_items
             WHERE id = $1 AND is_available = TRUE",
        )
        .bind(req.marketplace_item_id)
        .fetch_optional(pool)
        .await?;
        let (seller_id, available, price_per_unit) =
            item.ok_or_else(|| ApiError::not_found("Annonce introuvable"))?;

        if seller_id == buyer_id {
            return Err(ApiError::validation(
                "Impossible de commander sa propre annonce",
            ));
        }
        if req.quantity > available {
            return Err(ApiError::validation("Quantité supérieure au stock disponible"));
        }

        let order = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (buyer_id, seller_id, marketplace_item_id, quantity, total_price,
                                 delivery_address, delivery_date, delivery_time)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(buyer_id)
        .bind(seller_id)
        .bind(req.marketplace_item_id)
        .bind(req.quantity)
        .bind(req.quantity * price_per_unit)
        .bind(&req.delivery_address)
        .bind(req.delivery_date)
        .bind(&req.delivery_time)
        .fetch_one(pool)
        .await?;

        metrics::ORDERS_CREATED.inc();
        Ok(order)
    }

    /// Record the caller's confirmation. One side confirming moves the order
    /// to in_progress; both sides confirmed completes it.
    pub async fn confirm_order(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Order, ApiError> {
        let order = sqlx::query_as::<_, Order>(
            "UPDATE orders
             SET buyer_confirmed  = buyer_confirmed OR buyer_id = $2,
                 seller_confirmed = seller_confirmed OR seller_id = $2,
                 status = CASE
                     WHEN (buyer_confirmed OR buyer_id = $2)
                      AND (seller_confirmed OR seller_id = $2) THEN 'completed'
                     ELSE 'in_progress'
                 END,
                 updated_at = NOW()
             WHERE id = $1 AND (buyer_id = $2 OR seller_id = $2)
             RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Commande introuvable"))?;
        Ok(order)
    }

    /// Chat history of an order, ascending. Participants only.
    pub async fn list_messages(
        pool: &PgPool,
        user_id: Uuid,
        order_id: Uuid,
    ) -> Result<Vec<ChatMessage>, ApiError> {
        Self::participant_order(pool, user_id, order_id).await?;
        let messages = sqlx::query_as::<_, ChatMessage>(
            "SELECT * FROM chat_messages WHERE order_id = $1 ORDER BY created_at",
        )
        .bind(order_id)
        .fetch_all(pool)
        .await?;
        Ok(messages)
    }

    pub async fn send_message(
        pool: &PgPool,
        user_id: Uuid,
        order_id: Uuid,
        req: &CreateChatMessageRequest,
    ) -> Result<ChatMessage, ApiError> {
        if req.content.trim().is_empty() {
            return Err(ApiError::validation("Le message ne peut pas être vide"));
        }
        Self::participant_order(pool, user_id, order_id).await?;
        let message = sqlx::query_as::<_, ChatMessage>(
            "INSERT INTO chat_messages (order_id, sender_id, content)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(order_id)
        .bind(user_id)
        .bind(req.content.trim())
        .fetch_one(pool)
        .await?;
        Ok(message)
    }

    async fn participant_order(
        pool: &PgPool,
        user_id: Uuid,
        order_id: Uuid,
    ) -> Result<(), ApiError> {
        sqlx::query("SELECT 1 FROM orders WHERE id = $1 AND (buyer_id = $2 OR seller_id = $2)")
            .bind(order_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ApiError::not_found("Commande introuvable"))?;
        Ok(())
    }
}
