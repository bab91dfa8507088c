pub mod evaluation;
pub mod knobs;
pub mod output;
pub mod search;

pub use evaluation::{EvaluationResult, Scenario, SeedResult, evaluate_knobs, evaluate_seed};
pub use knobs::{AnnealingKnobs, KnobRanges};
pub use output::{print_topk, write_best_json, write_csv};
pub use search::{TunerConfig, TunerResults, percent_change, run_tuner};
