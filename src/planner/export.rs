use super::Grid;

/// Flatten a grid into CSV, one line per planned meal, days in order.
/// Empty days produce no lines.
pub fn grid_to_csv(grid: &Grid) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["date", "repas", "plat", "portions", "temps_cuisson_min"])?;

    for day in &grid.days {
        for group in &day.groups {
            for meal in &group.meals {
                writer.write_record([
                    day.date.to_string(),
                    group.meal_type.to_string(),
                    meal.dish.name.clone(),
                    meal.entry.servings.to_string(),
                    meal.dish.cooking_time_minutes.to_string(),
                ])?;
            }
        }
    }

    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use uuid::Uuid;

    use super::super::{build_grid, DateRange, MealType};
    use super::*;
    use crate::planner::grid::tests::{d, dish, entry};

    #[test]
    fn exports_one_line_per_meal_in_day_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let dishes = HashMap::from([(a, dish(a, "Couscous", 30)), (b, dish(b, "Ratatouille", 45))]);
        let range = DateRange::new(d("2024-01-01"), d("2024-01-03")).unwrap();
        let grid = build_grid(
            &range,
            vec![
                entry("2024-01-03", MealType::Lunch, a, 2),
                entry("2024-01-01", MealType::Dinner, b, 4),
            ],
            &dishes,
            None,
        );

        let csv = grid_to_csv(&grid).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "date,repas,plat,portions,temps_cuisson_min",
                "2024-01-01,dinner,Ratatouille,4,45",
                "2024-01-03,lunch,Couscous,2,30",
            ]
        );
    }

    #[test]
    fn empty_grid_exports_only_the_header() {
        let range = DateRange::new(d("2024-01-01"), d("2024-01-02")).unwrap();
        let grid = build_grid(&range, vec![], &HashMap::new(), None);
        let csv = grid_to_csv(&grid).unwrap();
        assert_eq!(csv.trim_end(), "date,repas,plat,portions,temps_cuisson_min");
    }
}
