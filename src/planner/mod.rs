pub mod annealing;
pub mod constants;
pub mod cost;
pub mod generator;
pub mod optimizer;
pub mod requirements;
pub mod solver;

pub use annealing::AnnealingConfig;
pub use constants::*;
pub use cost::{PlanCost, evaluate_plan, plan_cost};
pub use generator::{PlanFailure, generate_plan};
pub use optimizer::{OptimizationResult, optimize};
pub use requirements::{
    ActivityLevel, BodyMetrics, Sex, basal_metabolic_rate, bmi, bmi_category, compute_bounds,
    daily_energy_expenditure,
};
pub use solver::{Infeasibility, SearchStats, ValueOrdering, solve_day, solve_day_with_stats};
