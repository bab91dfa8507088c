use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::tuner::evaluation::EvaluationResult;

/// Round a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write all results to a CSV file.
pub fn write_csv(results: &[EvaluationResult], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "rank",
        "initial_temperature",
        "cooling_rate",
        "min_temperature",
        "avg_initial_cost",
        "avg_final_cost",
        "avg_best_cost",
        "avg_repetitions",
        "avg_iterations",
        "infeasible_seeds",
    ])?;

    for (i, result) in results.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            format!("{:.1}", result.knobs.initial_temperature),
            format!("{:.4}", result.knobs.cooling_rate),
            format!("{:.2e}", result.knobs.min_temperature),
            format!("{:.2}", result.avg_initial_cost),
            format!("{:.2}", result.avg_final_cost),
            format!("{:.2}", result.avg_best_cost),
            format!("{:.2}", result.avg_repetitions),
            format!("{:.0}", result.avg_iterations),
            result.infeasible_seeds.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the best result to a JSON file.
///
/// The `annealing` object has the same shape as the planner config section,
/// so it can be pasted into a config file.
pub fn write_best_json(best: &EvaluationResult, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "annealing": {
            "initial_temperature": truncate(best.knobs.initial_temperature, 1),
            "cooling_rate": truncate(best.knobs.cooling_rate, 4),
            "min_temperature": best.knobs.min_temperature,
        },
        "metrics": {
            "avg_initial_cost": truncate(best.avg_initial_cost, 2),
            "avg_final_cost": truncate(best.avg_final_cost, 2),
            "avg_best_cost": truncate(best.avg_best_cost, 2),
            "avg_repetitions": truncate(best.avg_repetitions, 2),
            "avg_iterations": truncate(best.avg_iterations, 0),
            "improvement_ratio": truncate(best.improvement_ratio(), 3),
        },
        "per_seed": best.per_seed.iter().map(|r| {
            serde_json::json!({
                "seed": r.seed,
                "initial_cost": truncate(r.initial_cost, 2),
                "final_cost": truncate(r.final_cost, 2),
                "best_cost": truncate(r.best_cost, 2),
                "best_repetitions": r.best_repetitions,
                "iterations": r.iterations,
            })
        }).collect::<Vec<_>>(),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

/// Print top-k results to stdout.
pub fn print_topk(results: &[EvaluationResult], k: usize) {
    println!("\n=== Top {} Results (by best cost) ===\n", k.min(results.len()));

    for (i, result) in results.iter().take(k).enumerate() {
        println!(
            "#{}: best={:.2} final={:.2} reps={:.2} iters={:.0} improvement={:.1}%",
            i + 1,
            result.avg_best_cost,
            result.avg_final_cost,
            result.avg_repetitions,
            result.avg_iterations,
            result.improvement_ratio() * 100.0
        );
        println!("    {}", result.knobs.display());
        println!();
    }
}
