use std::fmt;

use log::{debug, info};
use rand::Rng;

use crate::catalog::Catalog;
use crate::models::{NutrientBounds, Plan};
use crate::planner::solver::{Infeasibility, ValueOrdering, solve_day};

/// A plan could not be built because one day had no solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanFailure {
    /// Zero-based index of the first infeasible day.
    pub day: usize,
    pub reason: Infeasibility,
}

impl fmt::Display for PlanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {}: {}", self.day + 1, self.reason)
    }
}

/// Solve `days` independent daily menus.
///
/// Each day searches the full catalog from scratch. Any infeasible day fails
/// the whole request; partial plans are never returned.
pub fn generate_plan<R: Rng + ?Sized>(
    days: usize,
    bounds: &NutrientBounds,
    catalog: &Catalog,
    ordering: ValueOrdering,
    rng: &mut R,
) -> Result<Plan, PlanFailure> {
    let mut menus = Vec::with_capacity(days);

    for day in 0..days {
        let menu = solve_day(bounds, catalog, ordering, rng)
            .map_err(|reason| PlanFailure { day, reason })?;
        debug!(
            "day {}: {:.0} kcal, cost {:.2}",
            day + 1,
            menu.totals().calories,
            menu.cost()
        );
        menus.push(menu);
    }

    let plan = Plan::new(menus);
    info!(
        "generated {}-day plan, cost {:.2}, {} repeated dishes",
        plan.len(),
        plan.total_cost(),
        plan.repetition_count()
    );
    Ok(plan)
}
