pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod tuner;

pub use catalog::Catalog;
pub use error::{PlanError, Result};
pub use models::{Category, DayMenu, Dish, NutrientBounds, Plan};
