use std::collections::BTreeMap;

use log::warn;
use strsim::jaro_winkler;

use crate::catalog::portions::PORTION_VARIANTS;
use crate::error::{PlanError, Result};
use crate::models::{Category, Dish};

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
const FUZZY_THRESHOLD: f64 = 0.7;

/// Candidate dishes partitioned by meal category.
///
/// The catalog is never mutated by a search; solvers work on index domains
/// built from it, so every day starts from the full, unpruned candidate set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    dishes: BTreeMap<Category, Vec<Dish>>,
}

impl Catalog {
    /// Build a catalog from a flat list of dishes, validating each one.
    pub fn new(dishes: Vec<Dish>) -> Result<Self> {
        let mut map: BTreeMap<Category, Vec<Dish>> = BTreeMap::new();
        for dish in dishes {
            if let Some(reason) = dish.invalid_reason() {
                return Err(PlanError::InvalidDish {
                    name: dish.name,
                    reason,
                });
            }
            map.entry(dish.category).or_default().push(dish);
        }
        Ok(Self { dishes: map })
    }

    /// Candidates for a category (empty when the category is missing).
    pub fn dishes(&self, category: Category) -> &[Dish] {
        self.dishes
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every dish, grouped in serving order.
    pub fn all_dishes(&self) -> impl Iterator<Item = &Dish> {
        self.dishes.values().flatten()
    }

    /// First category with no candidates, if any.
    pub fn missing_category(&self) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| self.dishes(*c).is_empty())
    }

    /// At least one dish in every category.
    pub fn is_complete(&self) -> bool {
        self.missing_category().is_none()
    }

    /// Count of dishes in the catalog.
    pub fn len(&self) -> usize {
        self.dishes.values().map(Vec::len).sum()
    }

    /// Check if the catalog has no dishes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A new catalog holding every dish plus its scaled portion variants.
    pub fn with_portions(&self) -> Catalog {
        let mut expanded = self.clone();
        for (category, dishes) in &self.dishes {
            let variants: Vec<Dish> = dishes
                .iter()
                .flat_map(|dish| {
                    PORTION_VARIANTS
                        .iter()
                        .map(move |(factor, prefix)| dish.scaled(*factor, prefix))
                })
                .collect();
            if let Some(target) = expanded.dishes.get_mut(category) {
                target.extend(variants);
            }
        }
        expanded
    }

    /// Find dishes by name: substring hits first, then fuzzy matches.
    pub fn search(&self, query: &str) -> Vec<&Dish> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut exact: Vec<&Dish> = self
            .all_dishes()
            .filter(|d| d.name.to_lowercase().contains(&query))
            .collect();

        let mut fuzzy: Vec<(&Dish, f64)> = self
            .all_dishes()
            .filter(|d| !d.name.to_lowercase().contains(&query))
            .map(|d| (d, jaro_winkler(&d.name.to_lowercase(), &query)))
            .filter(|(_, score)| *score > FUZZY_THRESHOLD)
            .collect();

        fuzzy.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        exact.extend(fuzzy.into_iter().map(|(d, _)| d));
        exact
    }

    /// Warn about names that appear more than once; repetition is counted by name.
    pub fn warn_duplicate_names(&self) -> usize {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = 0;
        for dish in self.all_dishes() {
            if !seen.insert(dish.name.to_lowercase()) {
                warn!("duplicate dish name in catalog: {}", dish.name);
                duplicates += 1;
            }
        }
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dishes() -> Vec<Dish> {
        vec![
            Dish::new(Category::Breakfast, "Oatmeal with banana", 350.0, 14.0, 8.0, 58.0, 15.0),
            Dish::new(Category::Breakfast, "Scrambled eggs", 300.0, 18.0, 20.0, 5.0, 25.0),
            Dish::new(Category::Lunch, "Chicken with rice", 600.0, 36.0, 20.0, 70.0, 90.0),
            Dish::new(Category::Dinner, "Bean tacos", 500.0, 20.0, 18.0, 75.0, 60.0),
        ]
    }

    #[test]
    fn test_new_groups_by_category() {
        let catalog = Catalog::new(sample_dishes()).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.dishes(Category::Breakfast).len(), 2);
        assert_eq!(catalog.dishes(Category::Lunch).len(), 1);
        assert!(catalog.is_complete());
    }

    #[test]
    fn test_new_rejects_invalid_dish() {
        let mut dishes = sample_dishes();
        dishes[2].protein = -3.0;
        let err = Catalog::new(dishes).unwrap_err();
        assert!(matches!(err, PlanError::InvalidDish { ref name, .. } if name == "Chicken with rice"));
    }

    #[test]
    fn test_missing_category() {
        let dishes: Vec<Dish> = sample_dishes()
            .into_iter()
            .filter(|d| d.category != Category::Dinner)
            .collect();
        let catalog = Catalog::new(dishes).unwrap();
        assert_eq!(catalog.missing_category(), Some(Category::Dinner));
        assert!(catalog.dishes(Category::Dinner).is_empty());
    }

    #[test]
    fn test_with_portions_leaves_source_untouched() {
        let catalog = Catalog::new(sample_dishes()).unwrap();
        let expanded = catalog.with_portions();

        assert_eq!(catalog.len(), 4);
        assert_eq!(expanded.len(), 4 * (1 + PORTION_VARIANTS.len()));
        assert_eq!(expanded.dishes(Category::Lunch).len(), 1 + PORTION_VARIANTS.len());
        assert!(
            expanded
                .dishes(Category::Lunch)
                .iter()
                .any(|d| d.name == "Double portion of Chicken with rice" && d.calories == 1200.0)
        );
    }

    #[test]
    fn test_search_substring_then_fuzzy() {
        let catalog = Catalog::new(sample_dishes()).unwrap();
        let hits = catalog.search("TACOS");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Bean tacos");

        let fuzzy = catalog.search("scrambld eggs");
        assert_eq!(fuzzy.first().map(|d| d.name.as_str()), Some("Scrambled eggs"));

        assert!(catalog.search("   ").is_empty());
    }
}
