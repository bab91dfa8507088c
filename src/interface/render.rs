use serde_json::{Value, json};

use crate::models::{Category, DayMenu, Dish, NutrientBounds, NutrientTotals, Plan};
use crate::planner::constants::MAX_DISH_NAME_WIDTH;
use crate::planner::{BodyMetrics, OptimizationResult, PlanCost, PlanFailure, bmi_category};

/// Shorten a dish name to fit the table column.
fn fit_name(name: &str) -> String {
    if name.chars().count() <= MAX_DISH_NAME_WIDTH {
        return name.to_string();
    }
    let mut short: String = name.chars().take(MAX_DISH_NAME_WIDTH - 3).collect();
    short.push_str("...");
    short
}

fn print_row(label: &str, name: &str, totals: &NutrientTotals) {
    println!(
        "  {:<10} {:<width$} {:>7.0} {:>7.1} {:>7.1} {:>7.1} {:>8.2}",
        label,
        fit_name(name),
        totals.calories,
        totals.protein,
        totals.lipids,
        totals.carbs,
        totals.cost,
        width = MAX_DISH_NAME_WIDTH
    );
}

fn dish_totals(dish: &Dish) -> NutrientTotals {
    NutrientTotals::default().with(dish)
}

fn print_header() {
    println!(
        "  {:<10} {:<width$} {:>7} {:>7} {:>7} {:>7} {:>8}",
        "Meal",
        "Dish",
        "kcal",
        "prot",
        "lip",
        "carb",
        "cost",
        width = MAX_DISH_NAME_WIDTH
    );
}

fn display_day(index: usize, menu: &DayMenu, bounds: &NutrientBounds) {
    let status = if menu.is_solution(bounds) {
        ""
    } else {
        "  [outside bounds]"
    };
    println!("Day {}{}", index + 1, status);
    print_header();

    for category in Category::ALL {
        match menu.dish(category) {
            Some(dish) => print_row(category.label(), &dish.name, &dish_totals(dish)),
            None => println!("  {:<10} (unassigned)", category.label()),
        }
    }
    print_row("", "Total", menu.totals());
    println!();
}

/// Display a plan as one table per day, followed by plan totals.
pub fn display_plan(plan: &Plan, bounds: &NutrientBounds, cost: &PlanCost) {
    if plan.is_empty() {
        println!("Empty plan (zero days requested).");
        return;
    }

    println!();
    println!("=== Meal Plan ({} days) ===", plan.len());
    println!();

    for (i, menu) in plan.days().iter().enumerate() {
        display_day(i, menu, bounds);
    }

    let mut totals = NutrientTotals::default();
    for menu in plan.days() {
        for dish in menu.dishes() {
            totals.add(dish);
        }
    }
    let days = plan.len() as f64;

    println!("--- Summary ---");
    println!(
        "Daily average: {:.0} kcal, {:.1} g protein, {:.1} g lipids, {:.1} g carbs",
        totals.calories / days,
        totals.protein / days,
        totals.lipids / days,
        totals.carbs / days
    );
    println!("Repeated dishes: {}", cost.repetitions);
    println!("Money: {:.2}", cost.money);
    println!(
        "Repetition penalty: {:.2} ({} x {:.0})",
        cost.penalty(),
        cost.repetitions,
        cost.penalty_per_repetition
    );
    println!("Total cost: {:.2}", cost.total());
    println!();
}

/// JSON document for a successful plan: days with totals and the cost breakdown.
pub fn plan_json(plan: &Plan, cost: &PlanCost) -> Value {
    json!({
        "success": true,
        "plan": plan,
        "cost": {
            "money": cost.money,
            "repetitions": cost.repetitions,
            "repetition_penalty": cost.penalty(),
            "total": cost.total(),
        },
    })
}

/// JSON document for a plan request with no feasible day.
pub fn failure_json(failure: &PlanFailure) -> Value {
    json!({
        "success": false,
        "day": failure.day + 1,
        "reason": failure.reason,
        "message": failure.to_string(),
    })
}

/// Display the per-day nutrient intervals.
pub fn display_bounds(bounds: &NutrientBounds) {
    println!();
    println!("=== Daily Requirements ===");
    println!("  {:<10} {:>9} {:>9}", "Nutrient", "min", "max");
    println!(
        "  {:<10} {:>9.0} {:>9.0}",
        "kcal", bounds.min_calories, bounds.max_calories
    );
    println!(
        "  {:<10} {:>9.1} {:>9.1}",
        "protein g", bounds.min_protein, bounds.max_protein
    );
    println!(
        "  {:<10} {:>9.1} {:>9.1}",
        "lipids g", bounds.min_lipids, bounds.max_lipids
    );
    println!(
        "  {:<10} {:>9.1} {:>9.1}",
        "carbs g", bounds.min_carbs, bounds.max_carbs
    );
    println!();
}

/// Display body metrics with BMI.
pub fn display_metrics(metrics: &BodyMetrics) {
    let bmi = metrics.bmi();
    println!(
        "Weight {:.1} kg, height {:.0} cm, age {:.0}, BMI {:.1} ({})",
        metrics.weight_kg,
        metrics.height_cm,
        metrics.age_years,
        bmi,
        bmi_category(bmi)
    );
}

/// Display annealing statistics.
pub fn display_optimization(result: &OptimizationResult) {
    println!(
        "Optimization: cost {:.2} -> {:.2} (best {:.2}) in {} proposals",
        result.initial_cost, result.final_cost, result.best_cost, result.iterations
    );
    println!(
        "  accepted {} ({} improving), infeasible {}, final temperature {:.4}",
        result.accepted, result.improving, result.rejected_infeasible, result.final_temperature
    );
}

/// Display a list of dishes with their details.
pub fn display_dish_list(dishes: &[&Dish], title: &str) {
    if dishes.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} dishes) ===", title, dishes.len());
    println!();
    print_header();

    for dish in dishes {
        print_row(dish.category.label(), &dish.name, &dish_totals(dish));
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::planner::{Infeasibility, evaluate_plan};

    #[test]
    fn test_plan_json_has_success_flag_and_totals() {
        let mut day = DayMenu::new();
        day.assign(Dish::new(Category::Breakfast, "Toast", 300.0, 10.0, 5.0, 40.0, 12.0));
        day.assign(Dish::new(Category::Lunch, "Stew", 600.0, 30.0, 20.0, 60.0, 40.0));
        day.assign(Dish::new(Category::Dinner, "Soup", 400.0, 20.0, 10.0, 50.0, 25.0));
        let plan = Plan::new(vec![day.clone(), day]);

        let value = plan_json(&plan, &evaluate_plan(&plan, 1000.0));

        assert_eq!(value["success"], true);
        assert_eq!(value["plan"]["days"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["plan"]["days"][0]["totals"]["calories"], 1300.0);
        assert_eq!(value["cost"]["repetitions"], 3);
        assert_eq!(value["cost"]["total"], 3154.0);
    }

    #[test]
    fn test_failure_json_reports_reason() {
        let failure = PlanFailure {
            day: 2,
            reason: Infeasibility::MissingCategory(Category::Lunch),
        };
        let value = failure_json(&failure);

        assert_eq!(value["success"], false);
        assert_eq!(value["day"], 3);
        assert_eq!(value["reason"]["MissingCategory"], "lunch");
        assert!(value.get("plan").is_none());
    }

    #[test]
    fn test_fit_name_short_untouched() {
        assert_eq!(fit_name("Oatmeal"), "Oatmeal");
    }

    #[test]
    fn test_fit_name_truncates() {
        let long = "Portion and a half of grilled salmon with roasted vegetables and rice";
        let short = fit_name(long);
        assert_eq!(short.chars().count(), MAX_DISH_NAME_WIDTH);
        assert!(short.ends_with("..."));
    }
}
