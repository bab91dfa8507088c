use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::Result;
use crate::tuner::evaluation::{EvaluationResult, Scenario, evaluate_knobs};
use crate::tuner::knobs::{AnnealingKnobs, KnobRanges};

/// Configuration for the tuner.
#[derive(Debug, Clone)]
pub struct TunerConfig {
    /// Random knob sets to try, not counting the baseline.
    pub iterations: usize,
    /// Seed for drawing knob sets.
    pub seed: u64,
    pub ranges: KnobRanges,
    pub topk: usize,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            iterations: 50,
            seed: 123,
            ranges: KnobRanges::default(),
            topk: 10,
        }
    }
}

/// Results from a tuning run.
#[derive(Debug)]
pub struct TunerResults {
    /// All evaluation results, best first.
    pub results: Vec<EvaluationResult>,
    /// The baseline result using the default schedule.
    pub baseline: EvaluationResult,
}

impl TunerResults {
    pub fn best(&self) -> &EvaluationResult {
        self.results.first().unwrap_or(&self.baseline)
    }
}

/// Run random-search tuning over the annealing schedule.
pub fn run_tuner(config: &TunerConfig, scenario: &Scenario) -> Result<TunerResults> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut results = Vec::with_capacity(config.iterations + 1);

    let baseline = evaluate_knobs(&AnnealingKnobs::default(), scenario)?;
    println!(
        "Baseline: best={:.2} reps={:.2} iters={:.0}",
        baseline.avg_best_cost, baseline.avg_repetitions, baseline.avg_iterations
    );
    println!("    {}\n", baseline.knobs.display());

    println!("Running {} iterations...", config.iterations);
    let mut best_cost = baseline.avg_best_cost;

    for i in 0..config.iterations {
        let knobs = AnnealingKnobs::random(&mut rng, &config.ranges);
        let result = evaluate_knobs(&knobs, scenario)?;

        if result.avg_best_cost < best_cost {
            best_cost = result.avg_best_cost;
            println!(
                "[{}/{}] New best: cost={:.2} reps={:.2} iters={:.0}",
                i + 1,
                config.iterations,
                result.avg_best_cost,
                result.avg_repetitions,
                result.avg_iterations
            );
        }
        info!("knobs {} scored {:.2}", knobs.display(), result.avg_best_cost);
        results.push(result);

        if (i + 1) % (config.iterations / 10).max(1) == 0 {
            let pct = ((i + 1) as f64 / config.iterations as f64) * 100.0;
            eprint!("\r{:.0}% complete", pct);
        }
    }
    eprintln!();

    results.push(baseline.clone());
    results.sort_by(|a, b| a.cmp_score(b));

    Ok(TunerResults { results, baseline })
}

/// Relative cost change of `candidate` against `baseline`, in percent.
pub fn percent_change(candidate: &EvaluationResult, baseline: &EvaluationResult) -> f64 {
    if baseline.avg_best_cost > 0.0 && baseline.avg_best_cost.is_finite() {
        (candidate.avg_best_cost - baseline.avg_best_cost) / baseline.avg_best_cost * 100.0
    } else {
        0.0
    }
}
