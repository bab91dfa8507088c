use clap::Parser;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use menu_planner_rs::catalog::{Catalog, builtin_catalog, load_catalog, save_catalog_json};
use menu_planner_rs::cli::{Cli, Command, MetricsArgs};
use menu_planner_rs::config::{PlannerConfig, load_config};
use menu_planner_rs::error::Result;
use menu_planner_rs::interface::{
    PartialMetrics, collect_body_metrics, display_bounds, display_dish_list, display_metrics,
    display_optimization, display_plan, failure_json, plan_json, prompt_days,
};
use menu_planner_rs::models::{Category, Dish};
use menu_planner_rs::planner::{
    BodyMetrics, ValueOrdering, compute_bounds, daily_energy_expenditure, evaluate_plan,
    generate_plan, optimize,
};

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Plan {
            days,
            metrics,
            seed,
            no_optimize,
            no_expand,
            catalog,
            config,
            json,
        } => {
            let mut planner_config = match config {
                Some(path) => load_config(path)?,
                None => PlannerConfig::default(),
            };
            if no_expand {
                planner_config.expand_portions = false;
            }
            let catalog = open_catalog(catalog.as_deref(), planner_config.expand_portions)?;
            let options = PlanOptions {
                days,
                seed,
                optimize: !no_optimize,
                json,
            };
            cmd_plan(&catalog, &metrics, &planner_config, options)
        }
        Command::Catalog {
            search,
            category,
            expand,
            catalog,
            export,
        } => {
            let catalog = open_catalog(catalog.as_deref(), expand)?;
            if let Some(path) = export {
                save_catalog_json(&path, &catalog)?;
                println!("Wrote {} dishes to {}", catalog.len(), path.display());
                return Ok(());
            }
            cmd_catalog(&catalog, search.as_deref(), category);
            Ok(())
        }
        Command::Requirements { metrics } => cmd_requirements(&metrics),
    }
}

fn open_catalog(path: Option<&std::path::Path>, expand: bool) -> Result<Catalog> {
    let base = match path {
        Some(path) => load_catalog(path)?,
        None => builtin_catalog()?,
    };

    let catalog = if expand { base.with_portions() } else { base };
    info!("catalog ready: {} dishes", catalog.len());
    Ok(catalog)
}

fn resolve_metrics(args: &MetricsArgs) -> Result<BodyMetrics> {
    let partial = PartialMetrics::from(args);
    match partial.complete() {
        Some(metrics) => {
            metrics.validate()?;
            Ok(metrics)
        }
        None => collect_body_metrics(partial),
    }
}

struct PlanOptions {
    days: Option<usize>,
    seed: Option<u64>,
    optimize: bool,
    json: bool,
}

/// Generate a plan and refine it by annealing.
fn cmd_plan(
    catalog: &Catalog,
    metrics: &MetricsArgs,
    config: &PlannerConfig,
    options: PlanOptions,
) -> Result<()> {
    let bounds = match config.bounds {
        Some(bounds) => bounds,
        None => compute_bounds(&resolve_metrics(metrics)?)?,
    };
    let days = match options.days {
        Some(days) => days,
        None => prompt_days()?,
    };

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let plan = match generate_plan(days, &bounds, catalog, ValueOrdering::Shuffled, &mut rng) {
        Ok(plan) => plan,
        Err(failure) => {
            if options.json {
                println!("{}", serde_json::to_string_pretty(&failure_json(&failure))?);
            } else {
                println!("No feasible plan: {}", failure);
                display_bounds(&bounds);
            }
            return Ok(());
        }
    };

    let (plan, result) = if options.optimize {
        let result = optimize(&bounds, catalog, plan, &config.annealing, &mut rng)?;
        (result.best.clone(), Some(result))
    } else {
        (plan, None)
    };
    debug!("plan valid: {}", plan.is_valid(&bounds));

    let cost = evaluate_plan(&plan, config.annealing.repetition_penalty);
    if options.json {
        println!("{}", serde_json::to_string_pretty(&plan_json(&plan, &cost))?);
        return Ok(());
    }

    display_bounds(&bounds);
    display_plan(&plan, &bounds, &cost);
    if let Some(result) = &result {
        display_optimization(result);
    }
    Ok(())
}

/// List or search the catalog.
fn cmd_catalog(catalog: &Catalog, search: Option<&str>, category: Option<Category>) {
    let in_category = |dish: &&Dish| category.is_none_or(|c| dish.category == c);

    match search {
        Some(query) => {
            let hits: Vec<&Dish> = catalog
                .search(query)
                .into_iter()
                .filter(in_category)
                .collect();
            display_dish_list(&hits, &format!("Matches for '{}'", query));
        }
        None => {
            for c in Category::ALL {
                if category.is_some_and(|only| only != c) {
                    continue;
                }
                let dishes: Vec<&Dish> = catalog.dishes(c).iter().collect();
                display_dish_list(&dishes, c.label());
            }
        }
    }
}

/// Print BMI, energy expenditure, and the daily bounds.
fn cmd_requirements(args: &MetricsArgs) -> Result<()> {
    let metrics = resolve_metrics(args)?;
    let bounds = compute_bounds(&metrics)?;

    println!();
    display_metrics(&metrics);
    println!(
        "Estimated daily energy expenditure: {:.0} kcal",
        daily_energy_expenditure(&metrics)
    );
    display_bounds(&bounds);
    Ok(())
}
