use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::profile::{Profile, ProfileStats, UpdateProfileRequest},
};

pub struct ProfileService;

impl ProfileService {
    pub async fn get(pool: &PgPool, user_id: Uuid) -> Result<Profile, ApiError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ApiError::not_found("Profil introuvable"))?;
        Ok(profile)
    }

    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        req: &UpdateProfileRequest,
    ) -> Result<Profile, ApiError> {
        if req.username.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(ApiError::validation("Le nom d'utilisateur ne peut pas être vide"));
        }
        let profile = sqlx::query_as::<_, Profile>(
            "UPDATE profiles
             SET username   = COALESCE($1, username),
                 first_name = COALESCE($2, first_name),
                 last_name  = COALESCE($3, last_name),
                 avatar_url = COALESCE($4, avatar_url),
                 bio        = COALESCE($5, bio),
                 updated_at = NOW()
             WHERE id = $6
             RETURNING *",
        )
        .bind(&req.username)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.avatar_url)
        .bind(&req.bio)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Profil introuvable"))?;
        Ok(profile)
    }

    pub async fn stats(pool: &PgPool, user_id: Uuid) -> Result<ProfileStats, ApiError> {
        let stats = sqlx::query_as::<_, ProfileStats>(
            "SELECT
               (SELECT COUNT(*)::BIGINT FROM dishes WHERE author_id = $1)            AS dish_count,
               (SELECT COUNT(*)::BIGINT FROM meal_plans WHERE user_id = $1)          AS plan_count,
               (SELECT COUNT(*)::BIGINT FROM orders
                 WHERE seller_id = $1 AND status = 'completed')                      AS sale_count,
               (SELECT COUNT(*)::BIGINT FROM marketplace_items WHERE seller_id = $1) AS listing_count",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(stats)
    }
}
