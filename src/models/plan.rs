use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::planner::MealType;

/// DB row struct — meal_type is fetched as TEXT and parsed at the planner
/// boundary, like the other TEXT-backed enums.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MealPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub dish_id: Uuid,
    pub planned_date: NaiveDate,
    pub meal_type: String,
    pub servings: i32,
    pub created_at: DateTime<Utc>,
}

impl MealPlan {
    pub fn meal_type(&self) -> MealType {
        self.meal_type.parse().unwrap_or_default()
    }
}

/// Body for POST /meal-plans. Omitted meal_type defaults to lunch; omitted
/// servings default to the dish's serving count.
#[derive(Debug, Deserialize)]
pub struct CreateMealPlanRequest {
    pub dish_id: Uuid,
    pub planned_date: NaiveDate,
    pub meal_type: Option<MealType>,
    pub servings: Option<i32>,
}

/// Query params for GET /meal-plans and /meal-plans/stats.
#[derive(Debug, Deserialize)]
pub struct PlanRangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Query params for GET /meal-plans/grid and /meal-plans/export.
/// `meal_types` is a comma-separated list, e.g. "breakfast,dinner".
#[derive(Debug, Deserialize)]
pub struct GridQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub meal_types: Option<String>,
}
