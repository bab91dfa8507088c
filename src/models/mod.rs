mod dish;
mod nutrients;
mod plan;

pub use dish::{Category, Dish};
pub use nutrients::{BOUND_TOLERANCE, NutrientBounds, NutrientTotals};
pub use plan::{DayMenu, Plan};
