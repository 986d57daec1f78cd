use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::location::{CreateLocationRequest, UpdateLocationRequest, UserLocation},
};

pub struct LocationService;

impl LocationService {
    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<UserLocation>, ApiError> {
        let locations = sqlx::query_as::<_, UserLocation>(
            "SELECT * FROM user_locations
             WHERE user_id = $1
             ORDER BY is_default DESC, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(locations)
    }

    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        req: &CreateLocationRequest,
    ) -> Result<UserLocation, ApiError> {
        if req.name.trim().is_empty() || req.address.trim().is_empty() {
            return Err(ApiError::validation("Le nom et l'adresse sont requis"));
        }
        let is_default = req.is_default.unwrap_or(false);

        let mut tx = pool.begin().await?;
        if is_default {
            Self::clear_default(&mut tx, user_id).await?;
        }
        let location = sqlx::query_as::<_, UserLocation>(
            "INSERT INTO user_locations (user_id, name, address, latitude, longitude, is_default)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(user_id)
        .bind(req.name.trim())
        .bind(req.address.trim())
        .bind(req.latitude)
        .bind(req.longitude)
        .bind(is_default)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(location)
    }

    /// Setting `is_default` clears the previous default in the same
    /// transaction, keeping the single-default invariant.
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        req: &UpdateLocationRequest,
    ) -> Result<UserLocation, ApiError> {
        let mut tx = pool.begin().await?;
        if req.is_default == Some(true) {
            Self::clear_default(&mut tx, user_id).await?;
        }
        let location = sqlx::query_as::<_, UserLocation>(
            "UPDATE user_locations
             SET name       = COALESCE($1, name),
                 address    = COALESCE($2, address),
                 latitude   = COALESCE($3, latitude),
                 longitude  = COALESCE($4, longitude),
                 is_default = COALESCE($5, is_default),
                 updated_at = NOW()
             WHERE id = $6 AND user_id = $7
             RETURNING *",
        )
        .bind(&req.name)
        .bind(&req.address)
        .bind(req.latitude)
        .bind(req.longitude)
        .bind(req.is_default)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::not_found("Adresse introuvable"))?;
        tx.commit().await?;
        Ok(location)
    }

    pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM user_locations WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Adresse introuvable"));
        }
        Ok(())
    }

    async fn clear_default(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: Uuid,
    ) -> Result<(), ApiError> {
        sqlx::query("UPDATE user_locations SET is_default = FALSE WHERE user_id = $1 AND is_default = TRUE")
            .bind(user_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
