use std::cmp::Ordering;

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::catalog::{Catalog, builtin_catalog};
use crate::error::Result;
use crate::models::NutrientBounds;
use crate::planner::{
    ActivityLevel, AnnealingConfig, BodyMetrics, Sex, ValueOrdering, compute_bounds,
    generate_plan, optimize,
};
use crate::tuner::knobs::AnnealingKnobs;

/// Result of one optimizer run for a single seed.
#[derive(Debug, Clone)]
pub struct SeedResult {
    pub seed: u64,
    pub initial_cost: f64,
    pub final_cost: f64,
    pub best_cost: f64,
    pub best_repetitions: usize,
    pub iterations: usize,
}

/// Aggregated result of evaluating knobs across multiple seeds.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub knobs: AnnealingKnobs,
    pub avg_initial_cost: f64,
    pub avg_final_cost: f64,
    pub avg_best_cost: f64,
    pub avg_repetitions: f64,
    pub avg_iterations: f64,
    /// Seeds whose initial plan could not be generated.
    pub infeasible_seeds: usize,
    pub per_seed: Vec<SeedResult>,
}

impl EvaluationResult {
    /// Ordering by (avg_best_cost, avg_repetitions, avg_iterations);
    /// lower is better, so `Less` means `self` ranks first.
    pub fn cmp_score(&self, other: &Self) -> Ordering {
        self.avg_best_cost
            .total_cmp(&other.avg_best_cost)
            .then_with(|| self.avg_repetitions.total_cmp(&other.avg_repetitions))
            .then_with(|| self.avg_iterations.total_cmp(&other.avg_iterations))
    }

    /// Mean relative improvement from the generated plan to the best plan.
    pub fn improvement_ratio(&self) -> f64 {
        if self.avg_initial_cost > 0.0 && self.avg_best_cost.is_finite() {
            1.0 - self.avg_best_cost / self.avg_initial_cost
        } else {
            0.0
        }
    }
}

/// The fixed problem every knob set is scored on.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub catalog: Catalog,
    pub bounds: NutrientBounds,
    pub days: usize,
    pub seeds: Vec<u64>,
    /// Iteration ceiling and repetition penalty shared by all runs.
    pub base: AnnealingConfig,
}

impl Scenario {
    /// Built-in catalog with portion variants, bounds for a reference adult
    /// (70 kg, 170 cm, 30 years, sedentary).
    pub fn builtin(days: usize, seeds: Vec<u64>, base: AnnealingConfig) -> Result<Self> {
        let metrics = BodyMetrics {
            weight_kg: 70.0,
            height_cm: 170.0,
            age_years: 30.0,
            sex: Sex::Other,
            activity: ActivityLevel::Sedentary,
        };
        Ok(Self {
            catalog: builtin_catalog()?.with_portions(),
            bounds: compute_bounds(&metrics)?,
            days,
            seeds,
            base,
        })
    }
}

/// Run one seed: generate a plan and anneal it.
///
/// Returns `Ok(None)` when no initial plan exists for this seed.
pub fn evaluate_seed(
    knobs: &AnnealingKnobs,
    scenario: &Scenario,
    seed: u64,
) -> Result<Option<SeedResult>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let config = knobs.to_config(&scenario.base);

    let plan = match generate_plan(
        scenario.days,
        &scenario.bounds,
        &scenario.catalog,
        ValueOrdering::Shuffled,
        &mut rng,
    ) {
        Ok(plan) => plan,
        Err(failure) => {
            debug!("seed {}: {}", seed, failure);
            return Ok(None);
        }
    };

    let result = optimize(&scenario.bounds, &scenario.catalog, plan, &config, &mut rng)?;

    Ok(Some(SeedResult {
        seed,
        initial_cost: result.initial_cost,
        final_cost: result.final_cost,
        best_cost: result.best_cost,
        best_repetitions: result.best.repetition_count(),
        iterations: result.iterations,
    }))
}

/// Evaluate knobs on every seed of the scenario.
pub fn evaluate_knobs(knobs: &AnnealingKnobs, scenario: &Scenario) -> Result<EvaluationResult> {
    let mut per_seed = Vec::with_capacity(scenario.seeds.len());
    let mut infeasible_seeds = 0;

    for &seed in &scenario.seeds {
        match evaluate_seed(knobs, scenario, seed)? {
            Some(result) => per_seed.push(result),
            None => infeasible_seeds += 1,
        }
    }

    let avg = |f: fn(&SeedResult) -> f64| -> f64 {
        if per_seed.is_empty() {
            f64::INFINITY
        } else {
            per_seed.iter().map(f).sum::<f64>() / per_seed.len() as f64
        }
    };

    Ok(EvaluationResult {
        knobs: *knobs,
        avg_initial_cost: avg(|r| r.initial_cost),
        avg_final_cost: avg(|r| r.final_cost),
        avg_best_cost: avg(|r| r.best_cost),
        avg_repetitions: avg(|r| r.best_repetitions as f64),
        avg_iterations: avg(|r| r.iterations as f64),
        infeasible_seeds,
        per_seed,
    })
}
