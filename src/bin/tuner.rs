use std::path::PathBuf;

use clap::Parser;

use menu_planner_rs::planner::AnnealingConfig;
use menu_planner_rs::tuner::{
    KnobRanges, Scenario, TunerConfig, percent_change, print_topk, run_tuner, write_best_json,
    write_csv,
};

#[derive(Parser, Debug)]
#[command(name = "tuner")]
#[command(about = "Annealing schedule tuner for the menu planner")]
struct Args {
    /// Number of random search iterations
    #[arg(long, default_value = "50")]
    iters: usize,

    /// Random seed for drawing knob sets
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Plan seeds each knob set is scored on (comma-separated)
    #[arg(long, default_value = "1,2,3,4,5")]
    plan_seeds: String,

    /// Days per generated plan
    #[arg(long, default_value = "7")]
    days: usize,

    /// Proposal ceiling per optimizer run
    #[arg(long, default_value = "5000")]
    max_iterations: usize,

    /// Output CSV file for all results
    #[arg(long, default_value = "tuner_results.csv")]
    csv: PathBuf,

    /// Output JSON file for best result
    #[arg(long, default_value = "tuner_best.json")]
    json: PathBuf,

    /// Number of top results to display
    #[arg(long, default_value = "10")]
    topk: usize,
}

fn parse_seeds(s: &str) -> Vec<u64> {
    s.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let seeds = parse_seeds(&args.plan_seeds);
    if seeds.is_empty() {
        eprintln!("Error: no valid plan seeds provided");
        std::process::exit(1);
    }
    println!("Scoring on plan seeds: {:?}", seeds);

    let base = AnnealingConfig::default().with_max_iterations(args.max_iterations);
    let scenario = match Scenario::builtin(args.days, seeds, base) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Error building scenario: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Catalog: {} dishes, {} days, {:.0}-{:.0} kcal/day",
        scenario.catalog.len(),
        scenario.days,
        scenario.bounds.min_calories,
        scenario.bounds.max_calories
    );

    let config = TunerConfig {
        iterations: args.iters,
        seed: args.seed,
        ranges: KnobRanges::default(),
        topk: args.topk,
    };

    let tuned = match run_tuner(&config, &scenario) {
        Ok(tuned) => tuned,
        Err(e) => {
            eprintln!("Error during tuning: {}", e);
            std::process::exit(1);
        }
    };

    print_topk(&tuned.results, config.topk);

    let best = tuned.best();
    let baseline = &tuned.baseline;

    println!("=== Comparison: Best vs Baseline ===");
    println!(
        "Baseline: best={:.2} reps={:.2}",
        baseline.avg_best_cost, baseline.avg_repetitions
    );
    println!(
        "Best:     best={:.2} reps={:.2}",
        best.avg_best_cost, best.avg_repetitions
    );
    println!(
        "Change:   cost {:+.2}%  reps {:+.2}",
        percent_change(best, baseline),
        best.avg_repetitions - baseline.avg_repetitions
    );
    println!();

    if let Err(e) = write_csv(&tuned.results, &args.csv) {
        eprintln!("Error writing CSV: {}", e);
    } else {
        println!("Wrote all results to {:?}", args.csv);
    }

    if let Err(e) = write_best_json(best, &args.json) {
        eprintln!("Error writing JSON: {}", e);
    } else {
        println!("Wrote best result to {:?}", args.json);
    }
}
