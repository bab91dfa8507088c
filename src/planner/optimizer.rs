//! Simulated annealing over multi-day plans.

use log::{debug, info};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{Category, DayMenu, NutrientBounds, Plan};
use crate::planner::annealing::AnnealingConfig;
use crate::planner::constants::HISTORY_INTERVAL;
use crate::planner::cost::plan_cost;

/// Result of one optimizer run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// The current plan when the run stopped.
    pub plan: Plan,

    /// The lowest-cost plan seen along the way.
    pub best: Plan,

    pub initial_cost: f64,
    pub final_cost: f64,
    pub best_cost: f64,

    /// Proposals made, feasible or not.
    pub iterations: usize,

    /// Accepted moves, including improvements and sideways moves.
    pub accepted: usize,

    /// Accepted moves that strictly lowered the cost.
    pub improving: usize,

    /// Proposals whose mutated day broke the nutrient bounds.
    pub rejected_infeasible: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Best-so-far cost sampled every few proposals; never increases.
    pub cost_history: Vec<f64>,
}

/// Swap one random dish in one random day.
///
/// Returns `None` when the mutated day violates the bounds.
fn propose<R: Rng + ?Sized>(
    plan: &Plan,
    bounds: &NutrientBounds,
    catalog: &Catalog,
    rng: &mut R,
) -> Option<(usize, DayMenu)> {
    let day_index = rng.gen_range(0..plan.len());
    let category = Category::ALL[rng.gen_range(0..Category::ALL.len())];
    let dish = catalog.dishes(category).choose(rng)?;

    let mut menu = plan.day(day_index)?.clone();
    menu.replace(dish.clone());

    menu.is_solution(bounds).then_some((day_index, menu))
}

/// Refine a plan's cost and variety by simulated annealing.
///
/// Each proposal replaces one dish of one day with a random dish of the same
/// category from the full catalog. Proposals that break the day's bounds are
/// discarded but still advance the cooling schedule, so the run always ends
/// within `max_iterations` proposals. Every accepted state is valid.
pub fn optimize<R: Rng + ?Sized>(
    bounds: &NutrientBounds,
    catalog: &Catalog,
    initial: Plan,
    config: &AnnealingConfig,
    rng: &mut R,
) -> Result<OptimizationResult> {
    config.validate()?;

    let penalty = config.repetition_penalty;
    let initial_cost = plan_cost(&initial, penalty);

    let mut current = initial;
    let mut current_cost = initial_cost;
    let mut best = current.clone();
    let mut best_cost = current_cost;

    let mut step = 0usize;
    let mut accepted = 0usize;
    let mut improving = 0usize;
    let mut rejected_infeasible = 0usize;
    let mut cost_history = vec![best_cost];

    while !current.is_empty() && step < config.max_iterations {
        let temperature = config.temperature(step);
        if temperature < config.min_temperature {
            break;
        }
        step += 1;

        match propose(&current, bounds, catalog, rng) {
            None => rejected_infeasible += 1,
            Some((day_index, menu)) => {
                let mut neighbor = current.clone();
                neighbor.set_day(day_index, menu);
                let neighbor_cost = plan_cost(&neighbor, penalty);
                let delta = neighbor_cost - current_cost;

                // Metropolis criterion
                let accept = if delta <= 0.0 {
                    if delta < 0.0 {
                        improving += 1;
                    }
                    true
                } else {
                    rng.gen_range(0.0..1.0) < (-delta / temperature).exp()
                };

                if accept {
                    current = neighbor;
                    current_cost = neighbor_cost;
                    accepted += 1;

                    if current_cost < best_cost {
                        best = current.clone();
                        best_cost = current_cost;
                    }
                }
            }
        }

        if step % HISTORY_INTERVAL == 0 {
            cost_history.push(best_cost);
            debug!(
                "anneal step {}: T={:.3} current={:.2} best={:.2}",
                step, temperature, current_cost, best_cost
            );
        }
    }

    if cost_history.last() != Some(&best_cost) {
        cost_history.push(best_cost);
    }

    let final_temperature = config.temperature(step);
    info!(
        "annealing finished after {} proposals: cost {:.2} -> {:.2} (best {:.2}), {} accepted, {} infeasible",
        step, initial_cost, current_cost, best_cost, accepted, rejected_infeasible
    );

    Ok(OptimizationResult {
        plan: current,
        best,
        initial_cost,
        final_cost: current_cost,
        best_cost,
        iterations: step,
        accepted,
        improving,
        rejected_infeasible,
        final_temperature,
        cost_history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Dish;
    use crate::planner::generator::generate_plan;
    use crate::planner::solver::ValueOrdering;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn varied_catalog() -> Catalog {
        let mut dishes = Vec::new();
        for category in Category::ALL {
            for i in 0..8 {
                dishes.push(Dish::new(
                    category,
                    format!("{} option {}", category, i),
                    500.0,
                    25.0,
                    15.0,
                    60.0,
                    20.0 + 10.0 * i as f64,
                ));
            }
        }
        Catalog::new(dishes).unwrap()
    }

    #[test]
    fn test_empty_plan_returns_immediately() {
        let mut rng = StdRng::seed_from_u64(5);
        let result = optimize(
            &NutrientBounds::permissive(10_000.0),
            &varied_catalog(),
            Plan::default(),
            &AnnealingConfig::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(result.iterations, 0);
        assert!(result.plan.is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = AnnealingConfig::default().with_cooling_rate(1.5);
        assert!(
            optimize(
                &NutrientBounds::permissive(10_000.0),
                &varied_catalog(),
                Plan::default(),
                &config,
                &mut rng,
            )
            .is_err()
        );
    }

    #[test]
    fn test_removes_repetitions() {
        let bounds = NutrientBounds::permissive(10_000.0);
        let catalog = varied_catalog();
        let mut rng = StdRng::seed_from_u64(21);

        // Three identical days: six repeated dishes.
        let mut day = DayMenu::new();
        for category in Category::ALL {
            day.assign(catalog.dishes(category)[0].clone());
        }
        let initial = Plan::new(vec![day.clone(), day.clone(), day]);
        assert_eq!(initial.repetition_count(), 6);

        let config = AnnealingConfig::default().with_max_iterations(20_000).with_min_temperature(1e-9);
        let result = optimize(&bounds, &catalog, initial, &config, &mut rng).unwrap();

        assert!(result.best_cost < result.initial_cost);
        assert_eq!(result.best.repetition_count(), 0);
    }

    #[test]
    fn test_cost_history_is_non_increasing() {
        let bounds = NutrientBounds::permissive(10_000.0);
        let catalog = varied_catalog();
        let mut rng = StdRng::seed_from_u64(8);
        let plan = generate_plan(4, &bounds, &catalog, ValueOrdering::Shuffled, &mut rng).unwrap();

        let result = optimize(&bounds, &catalog, plan, &AnnealingConfig::default(), &mut rng).unwrap();

        assert!(result.cost_history.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(result.cost_history.last(), Some(&result.best_cost));
        assert!(result.best_cost <= result.initial_cost);
    }

    #[test]
    fn test_infeasible_proposals_advance_the_schedule() {
        // Only the first dish of each category fits; every swap is infeasible
        // unless it picks the same dish again.
        let mut dishes = Vec::new();
        for category in Category::ALL {
            dishes.push(Dish::new(category, format!("{} fit", category), 300.0, 20.0, 10.0, 40.0, 10.0));
            dishes.push(Dish::new(category, format!("{} huge", category), 3000.0, 20.0, 10.0, 40.0, 1.0));
        }
        let catalog = Catalog::new(dishes).unwrap();
        let bounds = NutrientBounds {
            max_calories: 1000.0,
            ..NutrientBounds::permissive(10_000.0)
        };
        let mut rng = StdRng::seed_from_u64(2);
        let plan = generate_plan(2, &bounds, &catalog, ValueOrdering::Shuffled, &mut rng).unwrap();

        let config = AnnealingConfig::default().with_max_iterations(100).with_min_temperature(1e-12);
        let result = optimize(&bounds, &catalog, plan, &config, &mut rng).unwrap();

        assert_eq!(result.iterations, 100);
        assert!(result.rejected_infeasible > 0);
        assert!(result.plan.is_valid(&bounds));
    }

    #[test]
    fn test_stops_at_min_temperature() {
        let bounds = NutrientBounds::permissive(10_000.0);
        let catalog = varied_catalog();
        let mut rng = StdRng::seed_from_u64(4);
        let plan = generate_plan(2, &bounds, &catalog, ValueOrdering::Shuffled, &mut rng).unwrap();

        let config = AnnealingConfig::default().with_max_iterations(1_000_000);
        let result = optimize(&bounds, &catalog, plan, &config, &mut rng).unwrap();

        // 10000 * 0.95^t < 1e-3 first holds at t = 315
        assert_eq!(result.iterations, 315);
        assert!(result.final_temperature < config.min_temperature);
    }
}
