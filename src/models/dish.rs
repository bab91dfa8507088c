use std::fmt;

use serde::{Deserialize, Serialize};

/// Meal slot a dish is served in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
}

impl Category {
    /// All categories in serving order.
    pub const ALL: [Category; 3] = [Category::Breakfast, Category::Lunch, Category::Dinner];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Breakfast => "Breakfast",
            Category::Lunch => "Lunch",
            Category::Dinner => "Dinner",
        }
    }

    /// Parse a category name (case-insensitive).
    pub fn parse(s: &str) -> Option<Category> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(Category::Breakfast),
            "lunch" => Some(Category::Lunch),
            "dinner" => Some(Category::Dinner),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A dish with its nutritional data and price.
///
/// Dishes are immutable once the catalog is built; portion variants are new
/// dishes, never edits of existing ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub category: Category,

    pub name: String,

    /// Energy in kcal.
    pub calories: f64,

    /// Protein in grams.
    pub protein: f64,

    /// Lipids in grams.
    pub lipids: f64,

    /// Carbohydrates in grams.
    pub carbs: f64,

    pub cost: f64,
}

impl Dish {
    pub fn new(
        category: Category,
        name: impl Into<String>,
        calories: f64,
        protein: f64,
        lipids: f64,
        carbs: f64,
        cost: f64,
    ) -> Self {
        Self {
            category,
            name: name.into(),
            calories,
            protein,
            lipids,
            carbs,
            cost,
        }
    }

    /// Basic validation: non-empty name and finite, non-negative numbers.
    pub fn is_valid(&self) -> bool {
        self.invalid_reason().is_none()
    }

    /// Describe the first problem found, if any.
    pub fn invalid_reason(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("name is empty".to_string());
        }
        let fields = [
            ("calories", self.calories),
            ("protein", self.protein),
            ("lipids", self.lipids),
            ("carbs", self.carbs),
            ("cost", self.cost),
        ];
        fields
            .iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
            .map(|(field, v)| format!("{} must be a non-negative number, got {}", field, v))
    }

    /// A scaled portion of this dish, renamed with the given prefix.
    pub fn scaled(&self, factor: f64, prefix: &str) -> Dish {
        Dish {
            category: self.category,
            name: format!("{}{}", prefix, self.name),
            calories: self.calories * factor,
            protein: self.protein * factor,
            lipids: self.lipids * factor,
            carbs: self.carbs * factor,
            cost: self.cost * factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dish() -> Dish {
        Dish::new(Category::Breakfast, "Oatmeal", 350.0, 14.0, 8.0, 58.0, 15.0)
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("Breakfast"), Some(Category::Breakfast));
        assert_eq!(Category::parse(" LUNCH "), Some(Category::Lunch));
        assert_eq!(Category::parse("brunch"), None);
    }

    #[test]
    fn test_is_valid() {
        assert!(sample_dish().is_valid());

        let mut negative = sample_dish();
        negative.cost = -1.0;
        assert!(!negative.is_valid());
        assert!(negative.invalid_reason().unwrap().contains("cost"));

        let mut unnamed = sample_dish();
        unnamed.name = "  ".to_string();
        assert!(!unnamed.is_valid());
    }

    #[test]
    fn test_scaled() {
        let half = sample_dish().scaled(0.5, "Half portion of ");
        assert_eq!(half.name, "Half portion of Oatmeal");
        assert_eq!(half.category, Category::Breakfast);
        assert!((half.calories - 175.0).abs() < 1e-9);
        assert!((half.protein - 7.0).abs() < 1e-9);
        assert!((half.cost - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&Category::Dinner).unwrap();
        assert_eq!(json, "\"dinner\"");
    }
}
