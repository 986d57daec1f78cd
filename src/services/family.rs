use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::family::{CreateFamilyMemberRequest, FamilyMember, UpdateFamilyMemberRequest},
};

pub struct FamilyService;

impl FamilyService {
    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<FamilyMember>, ApiError> {
        let members = sqlx::query_as::<_, FamilyMember>(
            "SELECT * FROM family_members WHERE user_id = $1 ORDER BY name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(members)
    }

    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        req: &CreateFamilyMemberRequest,
    ) -> Result<FamilyMember, ApiError> {
        if req.name.trim().is_empty() {
            return Err(ApiError::validation("Le nom du membre est requis"));
        }
        let member = sqlx::query_as::<_, FamilyMember>(
            "INSERT INTO family_members (user_id, name, email, phone, photo_url, gender,
                                         weight_kg, height_cm, allergies, dietary_restrictions,
                                         birth_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *",
        )
        .bind(user_id)
        .bind(req.name.trim())
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.photo_url)
        .bind(&req.gender)
        .bind(req.weight_kg)
        .bind(req.height_cm)
        .bind(&req.allergies)
        .bind(&req.dietary_restrictions)
        .bind(req.birth_date)
        .fetch_one(pool)
        .await?;
        Ok(member)
    }

    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        req: &UpdateFamilyMemberRequest,
    ) -> Result<FamilyMember, ApiError> {
        let member = sqlx::query_as::<_, FamilyMember>(
            "UPDATE family_members
             SET name                 = COALESCE($1, name),
                 email                = COALESCE($2, email),
                 phone                = COALESCE($3, phone),
                 photo_url            = COALESCE($4, photo_url),
                 gender               = COALESCE($5, gender),
                 weight_kg            = COALESCE($6, weight_kg),
                 height_cm            = COALESCE($7, height_cm),
                 allergies            = COALESCE($8, allergies),
                 dietary_restrictions = COALESCE($9, dietary_restrictions),
                 birth_date           = COALESCE($10, birth_date),
                 updated_at           = NOW()
             WHERE id = $11 AND user_id = $12
             RETURNING *",
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.photo_url)
        .bind(&req.gender)
        .bind(req.weight_kg)
        .bind(req.height_cm)
        .bind(&req.allergies)
        .bind(&req.dietary_restrictions)
        .bind(req.birth_date)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Membre de famille introuvable"))?;
        Ok(member)
    }

    pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM family_members WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Membre de famille introuvable"));
        }
        Ok(())
    }
}
