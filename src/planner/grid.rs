use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::plan::MealPlan;

use super::{DateRange, DayCell, DishSummary, Grid, MealGroup, MealType, PlannedMeal};

/// Arrange plan entries into the day-ordered, meal-type-grouped grid.
///
/// One `DayCell` per date of the range, ascending, empty days included.
/// Within a day, groups follow `MealType::ALL` and entries keep their input
/// order. Entries dated outside the range, or whose meal type is excluded by
/// `meal_filter`, are skipped. An entry whose dish is absent from `dishes`
/// gets a placeholder summary instead of being dropped.
pub fn build_grid(
    range: &DateRange,
    entries: Vec<MealPlan>,
    dishes: &HashMap<Uuid, DishSummary>,
    meal_filter: Option<&HashSet<MealType>>,
) -> Grid {
    let mut by_date: HashMap<NaiveDate, Vec<MealPlan>> = HashMap::new();
    for entry in entries {
        if !range.contains(entry.planned_date) {
            continue;
        }
        if let Some(filter) = meal_filter {
            if !filter.contains(&entry.meal_type()) {
                continue;
            }
        }
        by_date.entry(entry.planned_date).or_default().push(entry);
    }

    let days = range
        .iter()
        .map(|date| {
            let day_entries = by_date.remove(&date).unwrap_or_default();
            build_day(date, day_entries, dishes)
        })
        .collect();

    Grid {
        range: *range,
        days,
    }
}

fn build_day(
    date: NaiveDate,
    entries: Vec<MealPlan>,
    dishes: &HashMap<Uuid, DishSummary>,
) -> DayCell {
    let mut dish_count = 0u32;
    let mut cooking_time_minutes = 0u32;
    let mut servings = 0u32;

    let mut groups = Vec::new();
    for meal_type in MealType::ALL {
        let meals: Vec<PlannedMeal> = entries
            .iter()
            .filter(|e| e.meal_type() == meal_type)
            .map(|entry| {
                let (dish, resolved) = match dishes.get(&entry.dish_id) {
                    Some(d) => (d.clone(), true),
                    None => (DishSummary::placeholder(entry.dish_id), false),
                };
                PlannedMeal {
                    entry: entry.clone(),
                    dish,
                    resolved,
                }
            })
            .collect();

        if meals.is_empty() {
            continue;
        }

        for meal in &meals {
            dish_count += 1;
            cooking_time_minutes += meal.dish.cooking_time_minutes;
            servings += meal.entry.servings.max(0) as u32;
        }
        groups.push(MealGroup { meal_type, meals });
    }

    DayCell {
        date,
        groups,
        dish_count,
        cooking_time_minutes,
        servings,
    }
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use chrono::Utc;

    pub fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    pub fn entry(date: &str, meal_type: MealType, dish_id: Uuid, servings: i32) -> MealPlan {
        MealPlan {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            dish_id,
            planned_date: d(date),
            meal_type: meal_type.to_string(),
            servings,
            created_at: Utc::now(),
        }
    }

    pub fn dish(id: Uuid, name: &str, cooking_time_minutes: u32) -> DishSummary {
        DishSummary {
            id,
            name: name.into(),
            photo_url: None,
            cooking_time_minutes,
            default_servings: 4,
            description: None,
        }
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(d(start), d(end)).unwrap()
    }

    #[test]
    fn one_cell_per_day_ascending_including_empty_days() {
        let grid = build_grid(
            &range("2024-01-01", "2024-01-04"),
            vec![],
            &HashMap::new(),
            None,
        );
        assert_eq!(grid.days.len(), 4);
        let dates: Vec<NaiveDate> = grid.days.iter().map(|c| c.date).collect();
        assert_eq!(
            dates,
            vec![
                d("2024-01-01"),
                d("2024-01-02"),
                d("2024-01-03"),
                d("2024-01-04"),
            ]
        );
        assert!(grid.days.iter().all(|c| c.groups.is_empty()));
    }

    #[test]
    fn groups_follow_chronological_meal_order_regardless_of_input_order() {
        let a = Uuid::new_v4();
        let dishes = HashMap::from([(a, dish(a, "Gratin", 40))]);
        let grid = build_grid(
            &range("2024-01-01", "2024-01-01"),
            vec![
                entry("2024-01-01", MealType::Dinner, a, 2),
                entry("2024-01-01", MealType::Breakfast, a, 1),
                entry("2024-01-01", MealType::Lunch, a, 3),
            ],
            &dishes,
            None,
        );
        let order: Vec<MealType> = grid.days[0].groups.iter().map(|g| g.meal_type).collect();
        assert_eq!(
            order,
            vec![MealType::Breakfast, MealType::Lunch, MealType::Dinner]
        );
    }

    #[test]
    fn stacked_entries_in_one_slot_keep_input_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let dishes = HashMap::from([(a, dish(a, "Soupe", 20)), (b, dish(b, "Quiche", 35))]);
        let first = entry("2024-01-01", MealType::Lunch, a, 2);
        let second = entry("2024-01-01", MealType::Lunch, b, 4);
        let grid = build_grid(
            &range("2024-01-01", "2024-01-01"),
            vec![first.clone(), second.clone()],
            &dishes,
            None,
        );
        let lunch = &grid.days[0].groups[0];
        assert_eq!(lunch.meal_type, MealType::Lunch);
        assert_eq!(lunch.meals.len(), 2);
        assert_eq!(lunch.meals[0].entry.id, first.id);
        assert_eq!(lunch.meals[1].entry.id, second.id);
    }

    #[test]
    fn unresolved_dish_becomes_placeholder_not_dropped() {
        let missing = Uuid::new_v4();
        let grid = build_grid(
            &range("2024-01-01", "2024-01-01"),
            vec![entry("2024-01-01", MealType::Lunch, missing, 2)],
            &HashMap::new(),
            None,
        );
        let meal = &grid.days[0].groups[0].meals[0];
        assert!(!meal.resolved);
        assert_eq!(meal.dish.id, missing);
        assert_eq!(meal.dish.cooking_time_minutes, 0);
        assert_eq!(grid.days[0].dish_count, 1);
    }

    #[test]
    fn entries_outside_the_range_are_skipped() {
        let a = Uuid::new_v4();
        let dishes = HashMap::from([(a, dish(a, "Tajine", 60))]);
        let grid = build_grid(
            &range("2024-01-02", "2024-01-03"),
            vec![
                entry("2024-01-01", MealType::Lunch, a, 2),
                entry("2024-01-02", MealType::Lunch, a, 2),
                entry("2024-01-04", MealType::Dinner, a, 2),
            ],
            &dishes,
            None,
        );
        assert_eq!(grid.days[0].dish_count, 1);
        assert_eq!(grid.days[1].dish_count, 0);
    }

    #[test]
    fn meal_filter_drops_excluded_types_from_cells_and_rollups() {
        let a = Uuid::new_v4();
        let dishes = HashMap::from([(a, dish(a, "Crêpes", 15))]);
        let filter = HashSet::from([MealType::Breakfast]);
        let grid = build_grid(
            &range("2024-01-01", "2024-01-01"),
            vec![
                entry("2024-01-01", MealType::Breakfast, a, 3),
                entry("2024-01-01", MealType::Dinner, a, 2),
            ],
            &dishes,
            Some(&filter),
        );
        let day = &grid.days[0];
        assert_eq!(day.groups.len(), 1);
        assert_eq!(day.groups[0].meal_type, MealType::Breakfast);
        assert_eq!(day.dish_count, 1);
        assert_eq!(day.servings, 3);
        assert_eq!(day.cooking_time_minutes, 15);
    }

    #[test]
    fn day_rollups_sum_cooking_time_and_servings() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let dishes = HashMap::from([(a, dish(a, "Poulet", 30)), (b, dish(b, "Salade", 45))]);
        let grid = build_grid(
            &range("2024-01-01", "2024-01-01"),
            vec![
                entry("2024-01-01", MealType::Lunch, a, 2),
                entry("2024-01-01", MealType::Dinner, b, 4),
            ],
            &dishes,
            None,
        );
        let day = &grid.days[0];
        assert_eq!(day.dish_count, 2);
        assert_eq!(day.cooking_time_minutes, 75);
        assert_eq!(day.servings, 6);
    }
}
