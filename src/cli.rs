use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::interface::PartialMetrics;
use crate::models::Category;
use crate::planner::{ActivityLevel, Sex};

/// Multi-day meal planner: every day within nutrient bounds, at low cost and with little repetition.
#[derive(Parser, Debug)]
#[command(name = "menu_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Body measurements; any left out are asked for interactively.
#[derive(Args, Debug, Clone, Default)]
pub struct MetricsArgs {
    /// Weight in kilograms.
    #[arg(long)]
    pub weight: Option<f64>,

    /// Height in centimetres.
    #[arg(long)]
    pub height: Option<f64>,

    /// Age in years.
    #[arg(long)]
    pub age: Option<f64>,

    #[arg(long, value_enum)]
    pub sex: Option<Sex>,

    #[arg(long, value_enum)]
    pub activity: Option<ActivityLevel>,
}

impl From<&MetricsArgs> for PartialMetrics {
    fn from(args: &MetricsArgs) -> Self {
        PartialMetrics {
            weight_kg: args.weight,
            height_cm: args.height,
            age_years: args.age,
            sex: args.sex,
            activity: args.activity,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate and optimize a multi-day plan.
    Plan {
        /// Number of days to plan.
        #[arg(short, long)]
        days: Option<usize>,

        #[command(flatten)]
        metrics: MetricsArgs,

        /// Seed for a reproducible plan.
        #[arg(long)]
        seed: Option<u64>,

        /// Skip simulated annealing and show the generated plan.
        #[arg(long)]
        no_optimize: bool,

        /// Do not add scaled portion variants to the catalog.
        #[arg(long)]
        no_expand: bool,

        /// Dish catalog (.csv or .json) instead of the built-in one.
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Planner settings JSON file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the plan as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List or search the dish catalog.
    Catalog {
        /// Fuzzy search by dish name.
        #[arg(short, long)]
        search: Option<String>,

        /// Only show one category (breakfast, lunch, dinner).
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,

        /// Include scaled portion variants.
        #[arg(long)]
        expand: bool,

        /// Dish catalog (.csv or .json) instead of the built-in one.
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Write the catalog as JSON to this path.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Show BMI and the computed daily nutrient bounds.
    Requirements {
        #[command(flatten)]
        metrics: MetricsArgs,
    },
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::parse(s).ok_or_else(|| format!("unknown category '{}'", s))
}
