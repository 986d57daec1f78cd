use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::shopping::{
        CreateShoppingItemRequest, CreateShoppingListRequest, ShoppingList, ShoppingListItem,
        UpdateShoppingItemRequest,
    },
};

pub struct ShoppingService;

impl ShoppingService {
    /// The caller's own lists plus lists shared by other users.
    pub async fn list_lists(pool: &PgPool, user_id: Uuid) -> Result<Vec<ShoppingList>, ApiError> {
        let lists = sqlx::query_as::<_, ShoppingList>(
            "SELECT * FROM shopping_lists
             WHERE user_id = $1 OR is_shared = TRUE
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(lists)
    }

    pub async fn create_list(
        pool: &PgPool,
        user_id: Uuid,
        req: &CreateShoppingListRequest,
    ) -> Result<ShoppingList, ApiError> {
        if req.name.trim().is_empty() {
            return Err(ApiError::validation("Le nom de la liste est requis"));
        }
        let list = sqlx::query_as::<_, ShoppingList>(
            "INSERT INTO shopping_lists (user_id, name, is_shared)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(user_id)
        .bind(req.name.trim())
        .bind(req.is_shared.unwrap_or(false))
        .fetch_one(pool)
        .await?;
        Ok(list)
    }

    /// Owner only. Items go with the list (FK cascade).
    pub async fn delete_list(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM shopping_lists WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Liste de courses introuvable"));
        }
        Ok(())
    }

    pub async fn list_items(
        pool: &PgPool,
        user_id: Uuid,
        list_id: Uuid,
    ) -> Result<Vec<ShoppingListItem>, ApiError> {
        Self::accessible_list(pool, user_id, list_id).await?;
        let items = sqlx::query_as::<_, ShoppingListItem>(
            "SELECT sli.*, i.name AS ingredient_name
             FROM shopping_list_items sli
             JOIN ingredients i ON i.id = sli.ingredient_id
             WHERE sli.shopping_list_id = $1
             ORDER BY sli.created_at",
        )
        .bind(list_id)
        .fetch_all(pool)
        .await?;
        Ok(items)
    }

    pub async fn add_item(
        pool: &PgPool,
        user_id: Uuid,
        list_id: Uuid,
        req: &CreateShoppingItemRequest,
    ) -> Result<ShoppingListItem, ApiError> {
        if req.quantity <= 0.0 {
            return Err(ApiError::validation("La quantité doit être positive"));
        }
        Self::accessible_list(pool, user_id, list_id).await?;
        let (id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO shopping_list_items (shopping_list_id, ingredient_id, quantity, unit, added_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(list_id)
        .bind(req.ingredient_id)
        .bind(req.quantity)
        .bind(&req.unit)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Self::fetch_item(pool, id).await
    }

    /// Check off or adjust an item on any list the caller can access.
    pub async fn update_item(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        req: &UpdateShoppingItemRequest,
    ) -> Result<ShoppingListItem, ApiError> {
        if req.quantity.is_some_and(|q| q <= 0.0) {
            return Err(ApiError::validation("La quantité doit être positive"));
        }
        let result = sqlx::query(
            "UPDATE shopping_list_items sli
             SET quantity   = COALESCE($1, quantity),
                 unit       = COALESCE($2, unit),
                 is_checked = COALESCE($3, is_checked)
             FROM shopping_lists sl
             WHERE sli.id = $4
               AND sl.id = sli.shopping_list_id
               AND (sl.user_id = $5 OR sl.is_shared = TRUE)",
        )
        .bind(req.quantity)
        .bind(&req.unit)
        .bind(req.is_checked)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Article de liste introuvable"));
        }
        Self::fetch_item(pool, id).await
    }

    pub async fn delete_item(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query(
            "DELETE FROM shopping_list_items sli
             USING shopping_lists sl
             WHERE sli.id = $1
               AND sl.id = sli.shopping_list_id
               AND (sl.user_id = $2 OR sl.is_shared = TRUE)",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Article de liste introuvable"));
        }
        Ok(())
    }

    async fn accessible_list(pool: &PgPool, user_id: Uuid, list_id: Uuid) -> Result<(), ApiError> {
        sqlx::query(
            "SELECT 1 FROM shopping_lists WHERE id = $1 AND (user_id = $2 OR is_shared = TRUE)",
        )
        .bind(list_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Liste de courses introuvable"))?;
        Ok(())
    }

    async fn fetch_item(pool: &PgPool, id: Uuid) -> Result<ShoppingListItem, ApiError> {
        let item = sqlx::query_as::<_, ShoppingListItem>(
            "SELECT sli.*, i.name AS ingredient_name
             FROM shopping_list_items sli
             JOIN ingredients i ON i.id = sli.ingredient_id
             WHERE sli.id = $1",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(item)
    }
}
