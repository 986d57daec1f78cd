use super::{Grid, PlanStatistics};

/// Totals over every planned meal of the grid. A day counts toward
/// `unique_days_planned` when it has at least one meal after filtering.
pub fn compute_statistics(grid: &Grid) -> PlanStatistics {
    let mut stats = PlanStatistics {
        total_dishes: 0,
        total_cooking_time_minutes: 0,
        total_servings: 0,
        unique_days_planned: 0,
    };

    for day in &grid.days {
        stats.total_dishes += day.dish_count;
        stats.total_cooking_time_minutes += day.cooking_time_minutes;
        stats.total_servings += day.servings;
        if day.dish_count > 0 {
            stats.unique_days_planned += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use uuid::Uuid;

    use super::super::{build_grid, DateRange, MealType};
    use super::*;
    use crate::planner::grid::tests::{d, dish, entry};

    #[test]
    fn empty_grid_has_zero_statistics() {
        let range = DateRange::new(d("2024-01-01"), d("2024-01-07")).unwrap();
        let grid = build_grid(&range, vec![], &HashMap::new(), None);
        let stats = compute_statistics(&grid);
        assert_eq!(
            stats,
            PlanStatistics {
                total_dishes: 0,
                total_cooking_time_minutes: 0,
                total_servings: 0,
                unique_days_planned: 0,
            }
        );
    }

    #[test]
    fn three_day_scenario_totals() {
        // 3 days, two dishes planned on the 1st, none on the 2nd, one on the 3rd.
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let dishes = HashMap::from([(a, dish(a, "Couscous", 30)), (b, dish(b, "Ratatouille", 45))]);
        let range = DateRange::new(d("2024-01-01"), d("2024-01-03")).unwrap();
        let grid = build_grid(
            &range,
            vec![
                entry("2024-01-01", MealType::Lunch, a, 2),
                entry("2024-01-01", MealType::Dinner, b, 4),
                entry("2024-01-03", MealType::Lunch, a, 2),
            ],
            &dishes,
            None,
        );

        assert_eq!(grid.days.len(), 3);
        assert_eq!(grid.days[0].groups.len(), 2);
        assert!(grid.days[1].groups.is_empty());
        assert_eq!(grid.days[2].groups.len(), 1);

        let stats = compute_statistics(&grid);
        assert_eq!(stats.total_dishes, 3);
        assert_eq!(stats.total_cooking_time_minutes, 105);
        assert_eq!(stats.total_servings, 8);
        assert_eq!(stats.unique_days_planned, 2);
    }

    #[test]
    fn placeholder_dishes_count_but_add_no_cooking_time() {
        let known = Uuid::new_v4();
        let missing = Uuid::new_v4();
        let dishes = HashMap::from([(known, dish(known, "Pot-au-feu", 90))]);
        let range = DateRange::new(d("2024-01-01"), d("2024-01-01")).unwrap();
        let grid = build_grid(
            &range,
            vec![
                entry("2024-01-01", MealType::Lunch, known, 4),
                entry("2024-01-01", MealType::Dinner, missing, 2),
            ],
            &dishes,
            None,
        );

        let stats = compute_statistics(&grid);
        assert_eq!(stats.total_dishes, 2);
        assert_eq!(stats.total_cooking_time_minutes, 90);
        assert_eq!(stats.total_servings, 6);
        assert_eq!(stats.unique_days_planned, 1);
    }

    #[test]
    fn stacked_entries_of_the_same_dish_all_count() {
        let a = Uuid::new_v4();
        let dishes = HashMap::from([(a, dish(a, "Lasagnes", 50))]);
        let range = DateRange::new(d("2024-01-01"), d("2024-01-01")).unwrap();
        let grid = build_grid(
            &range,
            vec![
                entry("2024-01-01", MealType::Lunch, a, 2),
                entry("2024-01-01", MealType::Lunch, a, 2),
            ],
            &dishes,
            None,
        );

        let stats = compute_statistics(&grid);
        assert_eq!(stats.total_dishes, 2);
        assert_eq!(stats.total_cooking_time_minutes, 100);
        assert_eq!(stats.total_servings, 4);
        assert_eq!(stats.unique_days_planned, 1);
    }
}
