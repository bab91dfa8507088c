use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::{Category, Dish, NutrientBounds, NutrientTotals};

/// One day's dish assignment plus its running totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayMenu {
    /// At most one dish per category.
    assignment: BTreeMap<Category, Dish>,

    totals: NutrientTotals,
}

impl DayMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a dish to its category slot, replacing any previous one.
    pub fn assign(&mut self, dish: Dish) {
        self.replace(dish);
    }

    /// Swap the dish in `dish.category`, updating totals by the delta.
    ///
    /// Returns the dish that was replaced.
    pub fn replace(&mut self, dish: Dish) -> Option<Dish> {
        self.totals.add(&dish);
        let previous = self.assignment.insert(dish.category, dish);
        if let Some(ref old) = previous {
            self.totals.subtract(old);
        }
        previous
    }

    pub fn dish(&self, category: Category) -> Option<&Dish> {
        self.assignment.get(&category)
    }

    /// Dishes in serving order.
    pub fn dishes(&self) -> impl Iterator<Item = &Dish> {
        self.assignment.values()
    }

    pub fn totals(&self) -> &NutrientTotals {
        &self.totals
    }

    pub fn cost(&self) -> f64 {
        self.totals.cost
    }

    /// Exactly one dish per category.
    pub fn is_complete(&self) -> bool {
        Category::ALL.iter().all(|c| self.assignment.contains_key(c))
    }

    /// Complete and within every closed nutrient interval.
    pub fn is_solution(&self, bounds: &NutrientBounds) -> bool {
        self.is_complete() && bounds.admits(&self.totals)
    }
}

/// An ordered multi-day sequence of menus.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Plan {
    days: Vec<DayMenu>,
}

impl Plan {
    pub fn new(days: Vec<DayMenu>) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &[DayMenu] {
        &self.days
    }

    pub fn day(&self, index: usize) -> Option<&DayMenu> {
        self.days.get(index)
    }

    /// Replace the menu of one day in place.
    pub fn set_day(&mut self, index: usize, menu: DayMenu) {
        if let Some(slot) = self.days.get_mut(index) {
            *slot = menu;
        }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Sum of every day's monetary cost.
    pub fn total_cost(&self) -> f64 {
        self.days.iter().map(DayMenu::cost).sum()
    }

    /// Occurrences of each dish name across every slot of the plan.
    pub fn dish_counts(&self) -> HashMap<&str, usize> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for dish in self.days.iter().flat_map(|d| d.dishes()) {
            *counts.entry(dish.name.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Sum over distinct dish names of `occurrences - 1`.
    pub fn repetition_count(&self) -> usize {
        self.dish_counts()
            .values()
            .map(|&n| n.saturating_sub(1))
            .sum()
    }

    /// Every day independently satisfies the solution predicate.
    pub fn is_valid(&self, bounds: &NutrientBounds) -> bool {
        self.days.iter().all(|d| d.is_solution(bounds))
    }
}
