//! Pure planning core: date-range grid building, aggregate statistics and
//! CSV export. No I/O here — services fetch rows and dish summaries, this
//! module only arranges them.

mod export;
mod grid;
mod stats;

pub use export::grid_to_csv;
pub use grid::build_grid;
pub use stats::compute_statistics;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::plan::MealPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealType {
    /// Fixed chronological order, used for group ordering within a day.
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Snack,
        MealType::Dinner,
    ];
}

impl Default for MealType {
    fn default() -> Self {
        MealType::Lunch
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Snack => "snack",
            MealType::Dinner => "dinner",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for MealType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "snack" => Ok(MealType::Snack),
            "dinner" => Ok(MealType::Dinner),
            _ => Err(anyhow::anyhow!("Unknown meal type: {s}")),
        }
    }
}

/// Inclusive calendar window. Construction rejects reversed bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ApiError> {
        if start > end {
            return Err(ApiError::validation(
                "La date de début doit précéder la date de fin",
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Each date of the window, ascending.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |d| {
            if *d < end {
                d.succ_opt()
            } else {
                None
            }
        })
    }
}

/// What the grid needs to know about a dish. Built by the dish service from
/// catalog rows; `placeholder` stands in when the referenced dish no longer
/// resolves (deleted dish, foreign data) so the entry is still displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishSummary {
    pub id: Uuid,
    pub name: String,
    pub photo_url: Option<String>,
    pub cooking_time_minutes: u32,
    pub default_servings: u32,
    pub description: Option<String>,
}

impl DishSummary {
    pub fn placeholder(id: Uuid) -> Self {
        Self {
            id,
            name: String::new(),
            photo_url: None,
            cooking_time_minutes: 0,
            default_servings: 1,
            description: None,
        }
    }
}

/// A plan entry joined with its dish summary. `resolved` is false when the
/// dish had to be replaced by a placeholder.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedMeal {
    pub entry: MealPlan,
    pub dish: DishSummary,
    pub resolved: bool,
}

/// Entries of one meal type within a day, in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct MealGroup {
    pub meal_type: MealType,
    pub meals: Vec<PlannedMeal>,
}

/// One calendar day of the grid, with the rollups shown in the day footer.
#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub groups: Vec<MealGroup>,
    pub dish_count: u32,
    pub cooking_time_minutes: u32,
    pub servings: u32,
}

/// The full planning grid: exactly one `DayCell` per date of the range,
/// ascending.
#[derive(Debug, Clone, Serialize)]
pub struct Grid {
    pub range: DateRange,
    pub days: Vec<DayCell>,
}

/// Aggregates over a grid. Exact integer sums, no rounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanStatistics {
    pub total_dishes: u32,
    pub total_cooking_time_minutes: u32,
    pub total_servings: u32,
    pub unique_days_planned: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn range_rejects_reversed_bounds() {
        let err = DateRange::new(d("2024-01-03"), d("2024-01-01"));
        assert!(matches!(err, Err(ApiError::Validation(_))));
    }

    #[test]
    fn single_day_range_has_one_day() {
        let range = DateRange::new(d("2024-01-01"), d("2024-01-01")).unwrap();
        assert_eq!(range.len_days(), 1);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![d("2024-01-01")]);
    }

    #[test]
    fn range_iterates_every_day_ascending() {
        let range = DateRange::new(d("2024-02-27"), d("2024-03-02")).unwrap();
        let days: Vec<NaiveDate> = range.iter().collect();
        assert_eq!(
            days,
            vec![
                d("2024-02-27"),
                d("2024-02-28"),
                d("2024-02-29"),
                d("2024-03-01"),
                d("2024-03-02"),
            ]
        );
        assert_eq!(range.len_days(), 5);
    }

    #[test]
    fn meal_type_round_trips_through_text() {
        for mt in MealType::ALL {
            let parsed: MealType = mt.to_string().parse().unwrap();
            assert_eq!(parsed, mt);
        }
        assert!("souper".parse::<MealType>().is_err());
    }

    #[test]
    fn placeholder_counts_one_serving_and_no_cooking_time() {
        let id = Uuid::new_v4();
        let p = DishSummary::placeholder(id);
        assert_eq!(p.id, id);
        assert!(p.name.is_empty());
        assert_eq!(p.cooking_time_minutes, 0);
        assert_eq!(p.default_servings, 1);
    }
}
