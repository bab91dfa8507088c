use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::Dish;

/// Running nutrient and cost totals for a set of dishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotals {
    pub calories: f64,
    pub protein: f64,
    pub lipids: f64,
    pub carbs: f64,
    pub cost: f64,
}

impl NutrientTotals {
    /// Add one dish to the totals.
    pub fn add(&mut self, dish: &Dish) {
        self.calories += dish.calories;
        self.protein += dish.protein;
        self.lipids += dish.lipids;
        self.carbs += dish.carbs;
        self.cost += dish.cost;
    }

    /// Remove one dish from the totals.
    pub fn subtract(&mut self, dish: &Dish) {
        self.calories -= dish.calories;
        self.protein -= dish.protein;
        self.lipids -= dish.lipids;
        self.carbs -= dish.carbs;
        self.cost -= dish.cost;
    }

    /// Totals with one more dish, leaving `self` untouched.
    pub fn with(&self, dish: &Dish) -> NutrientTotals {
        let mut next = *self;
        next.add(dish);
        next
    }
}

/// Slack allowed on every bound check; totals are sums of decimal values.
pub const BOUND_TOLERANCE: f64 = 1e-6;

/// Closed per-day intervals for the four tracked nutrients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientBounds {
    pub min_calories: f64,
    pub max_calories: f64,
    pub min_protein: f64,
    pub max_protein: f64,
    pub min_lipids: f64,
    pub max_lipids: f64,
    pub min_carbs: f64,
    pub max_carbs: f64,
}

impl NutrientBounds {
    /// Bounds that every non-negative total satisfies up to `max`.
    pub fn permissive(max: f64) -> Self {
        Self {
            min_calories: 0.0,
            max_calories: max,
            min_protein: 0.0,
            max_protein: max,
            min_lipids: 0.0,
            max_lipids: max,
            min_carbs: 0.0,
            max_carbs: max,
        }
    }

    fn pairs(&self) -> [(&'static str, f64, f64); 4] {
        [
            ("calories", self.min_calories, self.max_calories),
            ("protein", self.min_protein, self.max_protein),
            ("lipids", self.min_lipids, self.max_lipids),
            ("carbs", self.min_carbs, self.max_carbs),
        ]
    }

    /// Reject negative or non-finite bounds.
    ///
    /// `min > max` is NOT a fault; it only makes every day infeasible.
    pub fn validate(&self) -> Result<()> {
        for (name, min, max) in self.pairs() {
            if !min.is_finite() || !max.is_finite() || min < 0.0 || max < 0.0 {
                return Err(PlanError::InvalidInput(format!(
                    "{} bounds must be non-negative numbers, got [{}, {}]",
                    name, min, max
                )));
            }
        }
        Ok(())
    }

    /// True when some interval is empty (min > max).
    pub fn is_degenerate(&self) -> bool {
        self.pairs().iter().any(|(_, min, max)| min > max)
    }

    /// Closed-interval check on calories, protein, lipids and carbs,
    /// within `BOUND_TOLERANCE`.
    pub fn admits(&self, totals: &NutrientTotals) -> bool {
        self.pairs()
            .iter()
            .zip(Self::values(totals))
            .all(|((_, min, max), v)| v >= min - BOUND_TOLERANCE && v <= max + BOUND_TOLERANCE)
    }

    /// True when any nutrient total is above its maximum by more than
    /// `BOUND_TOLERANCE`.
    pub fn exceeds_max(&self, totals: &NutrientTotals) -> bool {
        self.pairs()
            .iter()
            .zip(Self::values(totals))
            .any(|((_, _, max), v)| v > max + BOUND_TOLERANCE)
    }

    fn values(totals: &NutrientTotals) -> [f64; 4] {
        [totals.calories, totals.protein, totals.lipids, totals.carbs]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn bounds() -> NutrientBounds {
        NutrientBounds {
            min_calories: 1000.0,
            max_calories: 2000.0,
            min_protein: 50.0,
            max_protein: 150.0,
            min_lipids: 40.0,
            max_lipids: 90.0,
            min_carbs: 100.0,
            max_carbs: 300.0,
        }
    }

    fn totals(cal: f64, p: f64, l: f64, c: f64) -> NutrientTotals {
        NutrientTotals {
            calories: cal,
            protein: p,
            lipids: l,
            carbs: c,
            cost: 0.0,
        }
    }

    #[test]
    fn test_admits_closed_interval() {
        let b = bounds();
        assert!(b.admits(&totals(1000.0, 50.0, 40.0, 100.0)));
        assert!(b.admits(&totals(2000.0, 150.0, 90.0, 300.0)));
        assert!(!b.admits(&totals(999.9, 50.0, 40.0, 100.0)));
        assert!(!b.admits(&totals(1500.0, 151.0, 60.0, 200.0)));
    }

    #[test]
    fn test_exceeds_max_ignores_minimums() {
        let b = bounds();
        assert!(!b.exceeds_max(&totals(0.0, 0.0, 0.0, 0.0)));
        assert!(b.exceeds_max(&totals(2000.1, 0.0, 0.0, 0.0)));
        assert!(b.exceeds_max(&totals(0.0, 0.0, 90.5, 0.0)));
    }

    #[test]
    fn test_exact_bounds_tolerate_rounding() {
        let b = NutrientBounds {
            min_protein: 0.6,
            max_protein: 0.6,
            ..NutrientBounds::permissive(10_000.0)
        };
        let sum = 0.1 + 0.2 + 0.3;
        assert_ne!(sum, 0.6);
        assert!(b.admits(&totals(100.0, sum, 1.0, 1.0)));
        assert!(!b.exceeds_max(&totals(100.0, sum, 1.0, 1.0)));
        assert!(!b.admits(&totals(100.0, 0.61, 1.0, 1.0)));
        assert!(b.exceeds_max(&totals(100.0, 0.61, 1.0, 1.0)));
    }

    #[test]
    fn test_degenerate_and_validate() {
        let mut b = bounds();
        assert!(!b.is_degenerate());
        b.min_protein = 200.0;
        assert!(b.is_degenerate());
        assert!(b.validate().is_ok());

        b.max_carbs = -1.0;
        assert!(b.validate().is_err());
    }

    #[test]
    fn test_totals_add_subtract() {
        let dish = Dish::new(Category::Lunch, "Soup", 300.0, 12.0, 9.0, 40.0, 55.0);
        let mut t = NutrientTotals::default();
        t.add(&dish);
        t.add(&dish);
        t.subtract(&dish);
        assert_eq!(t, NutrientTotals::default().with(&dish));
    }
}
