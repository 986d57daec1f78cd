use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::plan::{CreateMealPlanRequest, MealPlan},
    planner::{self, DateRange, Grid, MealType, PlanStatistics},
    services::{dishes::DishService, metrics},
};

pub struct MealPlanService;

impl MealPlanService {
    /// Entries of the caller within the range, date then creation order.
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<MealPlan>, ApiError> {
        let entries = sqlx::query_as::<_, MealPlan>(
            "SELECT * FROM meal_plans
             WHERE user_id = $1 AND planned_date BETWEEN $2 AND $3
             ORDER BY planned_date, created_at",
        )
        .bind(user_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(pool)
        .await?;
        Ok(entries)
    }

    /// Fetch the caller's entries, resolve dish summaries and arrange the
    /// planning grid.
    pub async fn grid(
        pool: &PgPool,
        user_id: Uuid,
        range: &DateRange,
        meal_filter: Option<&HashSet<MealType>>,
    ) -> Result<Grid, ApiError> {
        let entries = Self::list(pool, user_id, range).await?;
        let dish_ids: Vec<Uuid> = entries.iter().map(|e| e.dish_id).collect();
        let dishes = DishService::lookup_summaries(pool, &dish_ids).await?;
        Ok(planner::build_grid(range, entries, &dishes, meal_filter))
    }

    pub async fn statistics(
        pool: &PgPool,
        user_id: Uuid,
        range: &DateRange,
    ) -> Result<PlanStatistics, ApiError> {
        let grid = Self::grid(pool, user_id, range, None).await?;
        Ok(planner::compute_statistics(&grid))
    }

    pub async fn export_csv(
        pool: &PgPool,
        user_id: Uuid,
        range: &DateRange,
        meal_filter: Option<&HashSet<MealType>>,
    ) -> Result<String, ApiError> {
        let grid = Self::grid(pool, user_id, range, meal_filter).await?;
        Ok(planner::grid_to_csv(&grid)?)
    }

    /// Insert one plan entry. Not idempotent: the same dish can stack in the
    /// same day/meal slot any number of times. Defaults: meal_type lunch,
    /// servings from the dish.
    pub async fn add_entry(
        pool: &PgPool,
        user_id: Uuid,
        req: &CreateMealPlanRequest,
    ) -> Result<MealPlan, ApiError> {
        let dish: Option<(i32,)> = sqlx::query_as(
            "SELECT servings FROM dishes WHERE id = $1 AND (is_public = TRUE OR author_id = $2)",
        )
        .bind(req.dish_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        let (default_servings,) = dish.ok_or_else(|| ApiError::not_found("Plat introuvable"))?;

        let servings = req.servings.unwrap_or(default_servings);
        if servings < 1 {
            return Err(ApiError::validation("servings doit être au moins 1"));
        }
        let meal_type = req.meal_type.unwrap_or_default();

        let entry = sqlx::query_as::<_, MealPlan>(
            "INSERT INTO meal_plans (user_id, dish_id, planned_date, meal_type, servings)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(user_id)
        .bind(req.dish_id)
        .bind(req.planned_date)
        .bind(meal_type.to_string())
        .bind(servings)
        .fetch_one(pool)
        .await?;

        metrics::PLANS_CREATED.inc();
        Ok(entry)
    }

    /// Delete one entry of the caller. Absent or foreign ids are a hard 404,
    /// never a silent success.
    pub async fn remove_entry(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM meal_plans WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Entrée de planning introuvable"));
        }
        metrics::PLANS_REMOVED.inc();
        Ok(())
    }

    /// Parse the `meal_types` query param ("breakfast,dinner") into a filter
    /// set. Empty/absent means no filtering.
    pub fn parse_meal_filter(raw: Option<&str>) -> Result<Option<HashSet<MealType>>, ApiError> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        let mut set = HashSet::new();
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let meal_type = part
                .parse::<MealType>()
                .map_err(|_| ApiError::validation(format!("Type de repas inconnu: {part}")))?;
            set.insert(meal_type);
        }
        Ok(if set.is_empty() { None } else { Some(set) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_comma_separated_meal_filter() {
        let filter = MealPlanService::parse_meal_filter(Some("breakfast, dinner"))
            .unwrap()
            .unwrap();
        assert_eq!(
            filter,
            HashSet::from([MealType::Breakfast, MealType::Dinner])
        );
    }

    #[test]
    fn absent_or_empty_filter_means_no_filtering() {
        assert!(MealPlanService::parse_meal_filter(None).unwrap().is_none());
        assert!(MealPlanService::parse_meal_filter(Some(""))
            .unwrap()
            .is_none());
    }

    #[test]
    fn unknown_meal_type_is_a_validation_error() {
        let err = MealPlanService::parse_meal_filter(Some("souper"));
        assert!(matches!(err, Err(ApiError::Validation(_))));
    }
}
