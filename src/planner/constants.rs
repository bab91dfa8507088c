// ─────────────────────────────────────────────────────────────────────────────
// Simulated annealing defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Starting temperature of the cooling schedule.
pub const INITIAL_TEMPERATURE: f64 = 10_000.0;

/// Geometric cooling factor applied once per proposal.
pub const COOLING_RATE: f64 = 0.95;

/// The search stops once the temperature falls below this.
pub const MIN_TEMPERATURE: f64 = 1e-3;

/// Hard ceiling on annealing proposals.
pub const MAX_ITERATIONS: usize = 5_000;

/// Cost added per repeated dish occurrence across a plan.
pub const REPETITION_PENALTY: f64 = 1_000.0;

/// Best-so-far cost is sampled into the history every this many proposals.
pub const HISTORY_INTERVAL: usize = 25;

// ─────────────────────────────────────────────────────────────────────────────
// Requirement formulas
// ─────────────────────────────────────────────────────────────────────────────

/// Energy per gram of protein and of carbohydrates (kcal).
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;

/// Energy per gram of lipids (kcal).
pub const KCAL_PER_GRAM_LIPIDS: f64 = 9.0;

/// Daily calorie window around the estimated expenditure.
pub const CALORIE_LOWER_FACTOR: f64 = 0.9;
pub const CALORIE_UPPER_FACTOR: f64 = 1.1;

/// Share of energy from each macronutrient: (min, max).
pub const PROTEIN_ENERGY_SHARE: (f64, f64) = (0.10, 0.35);
pub const LIPIDS_ENERGY_SHARE: (f64, f64) = (0.20, 0.35);
pub const CARBS_ENERGY_SHARE: (f64, f64) = (0.45, 0.65);

// ─────────────────────────────────────────────────────────────────────────────
// Display
// ─────────────────────────────────────────────────────────────────────────────

/// Longest dish name shown before truncation.
pub const MAX_DISH_NAME_WIDTH: usize = 48;
