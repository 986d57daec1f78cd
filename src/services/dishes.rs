use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::dish::{
        CreateDishRequest, Dish, DishIngredient, DishIngredientInput, DishResponse,
        UpdateDishRequest,
    },
    planner::DishSummary,
    services::metrics,
};

pub struct DishService;

impl DishService {
    /// Public catalog, newest first, with the caller's favorite flags.
    pub async fn list_public(pool: &PgPool, viewer_id: Uuid) -> Result<Vec<DishResponse>, ApiError> {
        let dishes = sqlx::query_as::<_, Dish>(
            "SELECT * FROM dishes WHERE is_public = TRUE ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Self::with_details(pool, viewer_id, dishes).await
    }

    pub async fn list_mine(pool: &PgPool, author_id: Uuid) -> Result<Vec<DishResponse>, ApiError> {
        let dishes = sqlx::query_as::<_, Dish>(
            "SELECT * FROM dishes WHERE author_id = $1 ORDER BY created_at DESC",
        )
        .bind(author_id)
        .fetch_all(pool)
        .await?;
        Self::with_details(pool, author_id, dishes).await
    }

    pub async fn create(
        pool: &PgPool,
        author_id: Uuid,
        req: &CreateDishRequest,
    ) -> Result<DishResponse, ApiError> {
        if req.name.trim().is_empty() {
            return Err(ApiError::validation("Le nom du plat est requis"));
        }
        let servings = req.servings.unwrap_or(4);
        if servings < 1 {
            return Err(ApiError::validation("servings doit être au moins 1"));
        }

        let mut tx = pool.begin().await?;
        let dish = sqlx::query_as::<_, Dish>(
            "INSERT INTO dishes (author_id, name, description, photo_url, cooking_time_minutes,
                                 servings, is_public, recipe_content, recipe_file_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(author_id)
        .bind(req.name.trim())
        .bind(&req.description)
        .bind(&req.photo_url)
        .bind(req.cooking_time_minutes)
        .bind(servings)
        .bind(req.is_public.unwrap_or(false))
        .bind(&req.recipe_content)
        .bind(&req.recipe_file_url)
        .fetch_one(&mut *tx)
        .await?;

        Self::insert_ingredient_lines(&mut tx, dish.id, &req.ingredients).await?;
        tx.commit().await?;

        metrics::DISHES_CREATED.inc();
        Self::fetch_one(pool, author_id, dish.id).await
    }

    /// Partial update, author only. A present ingredient list replaces all
    /// existing lines.
    pub async fn update(
        pool: &PgPool,
        author_id: Uuid,
        id: Uuid,
        req: &UpdateDishRequest,
    ) -> Result<DishResponse, ApiError> {
        if let Some(servings) = req.servings {
            if servings < 1 {
                return Err(ApiError::validation("servings doit être au moins 1"));
            }
        }

        let mut tx = pool.begin().await?;
        let dish = sqlx::query_as::<_, Dish>(
            "UPDATE dishes
             SET name                 = COALESCE($1, name),
                 description          = COALESCE($2, description),
                 photo_url            = COALESCE($3, photo_url),
                 cooking_time_minutes = COALESCE($4, cooking_time_minutes),
                 servings             = COALESCE($5, servings),
                 is_public            = COALESCE($6, is_public),
                 recipe_content       = COALESCE($7, recipe_content),
                 recipe_file_url      = COALESCE($8, recipe_file_url),
                 updated_at           = NOW()
             WHERE id = $9 AND author_id = $10
             RETURNING *",
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.photo_url)
        .bind(req.cooking_time_minutes)
        .bind(req.servings)
        .bind(req.is_public)
        .bind(&req.recipe_content)
        .bind(&req.recipe_file_url)
        .bind(id)
        .bind(author_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::not_found("Plat introuvable"))?;

        if let Some(lines) = &req.ingredients {
            sqlx::query("DELETE FROM dish_ingredients WHERE dish_id = $1")
                .bind(dish.id)
                .execute(&mut *tx)
                .await?;
            Self::insert_ingredient_lines(&mut tx, dish.id, lines).await?;
        }
        tx.commit().await?;

        Self::fetch_one(pool, author_id, dish.id).await
    }

    /// Author only. Plan entries referencing the dish are kept; the grid
    /// shows them with a placeholder summary.
    pub async fn delete(pool: &PgPool, author_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM dishes WHERE id = $1 AND author_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Plat introuvable"));
        }
        Ok(())
    }

    /// Toggle the caller's favorite and return the new state.
    pub async fn toggle_favorite(
        pool: &PgPool,
        user_id: Uuid,
        dish_id: Uuid,
    ) -> Result<bool, ApiError> {
        sqlx::query("SELECT 1 FROM dishes WHERE id = $1 AND (is_public = TRUE OR author_id = $2)")
            .bind(dish_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ApiError::not_found("Plat introuvable"))?;

        let removed = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND dish_id = $2")
            .bind(user_id)
            .bind(dish_id)
            .execute(pool)
            .await?;
        if removed.rows_affected() > 0 {
            return Ok(false);
        }

        sqlx::query("INSERT INTO favorites (user_id, dish_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(dish_id)
            .execute(pool)
            .await?;
        Ok(true)
    }

    /// Summaries for the planner, keyed by dish id. Missing ids are simply
    /// absent — the grid substitutes placeholders.
    pub async fn lookup_summaries(
        pool: &PgPool,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, DishSummary>, ApiError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(Uuid, String, Option<String>, Option<i32>, i32, Option<String>)> =
            sqlx::query_as(
                "SELECT id, name, photo_url, cooking_time_minutes, servings, description
                 FROM dishes WHERE id = ANY($1)",
            )
            .bind(ids)
            .fetch_all(pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, photo_url, cooking_time, servings, description)| {
                (
                    id,
                    DishSummary {
                        id,
                        name,
                        photo_url,
                        cooking_time_minutes: cooking_time.unwrap_or(0).max(0) as u32,
                        default_servings: servings.max(1) as u32,
                        description,
                    },
                )
            })
            .collect())
    }

    async fn fetch_one(pool: &PgPool, viewer_id: Uuid, id: Uuid) -> Result<DishResponse, ApiError> {
        let dish = sqlx::query_as::<_, Dish>("SELECT * FROM dishes WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        let mut responses = Self::with_details(pool, viewer_id, vec![dish]).await?;
        responses
            .pop()
            .ok_or_else(|| ApiError::not_found("Plat introuvable"))
    }

    /// Stitch author names, ingredient lines and favorite flags onto dish
    /// rows in two auxiliary queries.
    async fn with_details(
        pool: &PgPool,
        viewer_id: Uuid,
        dishes: Vec<Dish>,
    ) -> Result<Vec<DishResponse>, ApiError> {
        if dishes.is_empty() {
            return Ok(Vec::new());
        }
        let dish_ids: Vec<Uuid> = dishes.iter().map(|d| d.id).collect();
        let author_ids: Vec<Uuid> = dishes.iter().map(|d| d.author_id).collect();

        let mut lines: HashMap<Uuid, Vec<DishIngredient>> = HashMap::new();
        let rows = sqlx::query_as::<_, DishIngredient>(
            "SELECT di.id, di.dish_id, di.ingredient_id, i.name AS ingredient_name,
                    di.quantity, di.unit
             FROM dish_ingredients di
             JOIN ingredients i ON i.id = di.ingredient_id
             WHERE di.dish_id = ANY($1)",
        )
        .bind(&dish_ids)
        .fetch_all(pool)
        .await?;
        for row in rows {
            lines.entry(row.dish_id).or_default().push(row);
        }

        let authors: HashMap<Uuid, Option<String>> =
            sqlx::query_as::<_, (Uuid, Option<String>)>(
                "SELECT id, username FROM profiles WHERE id = ANY($1)",
            )
            .bind(&author_ids)
            .fetch_all(pool)
            .await?
            .into_iter()
            .collect();

        let favorites: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT dish_id FROM favorites WHERE user_id = $1 AND dish_id = ANY($2)",
        )
        .bind(viewer_id)
        .bind(&dish_ids)
        .fetch_all(pool)
        .await?;
        let favorite_ids: std::collections::HashSet<Uuid> =
            favorites.into_iter().map(|(id,)| id).collect();

        Ok(dishes
            .into_iter()
            .map(|dish| DishResponse {
                author_username: authors.get(&dish.author_id).cloned().flatten(),
                is_favorite: favorite_ids.contains(&dish.id),
                ingredients: lines.remove(&dish.id).unwrap_or_default(),
                dish,
            })
            .collect())
    }

    async fn insert_ingredient_lines(
        tx: &mut Transaction<'_, Postgres>,
        dish_id: Uuid,
        lines: &[DishIngredientInput],
    ) -> Result<(), ApiError> {
        for line in lines {
            if line.quantity <= 0.0 {
                return Err(ApiError::validation(
                    "La quantité d'un ingrédient doit être positive",
                ));
            }
            sqlx::query(
                "INSERT INTO dish_ingredients (dish_id, ingredient_id, quantity, unit)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(dish_id)
            .bind(line.ingredient_id)
            .bind(line.quantity)
            .bind(&line.unit)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
