use std::fs;
use std::path::Path;

use log::info;

use crate::catalog::Catalog;
use crate::error::{PlanError, Result};
use crate::models::Dish;

/// Built-in dish table, `category,name,calories,protein,lipids,carbs,cost`.
const BUILTIN_CATALOG_CSV: &str = include_str!("../../data/catalog.csv");

/// Parse dishes from CSV text with a header row.
pub fn parse_dishes_csv(content: &str) -> Result<Vec<Dish>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut dishes = Vec::new();
    for record in reader.deserialize() {
        let dish: Dish = record?;
        dishes.push(dish);
    }
    Ok(dishes)
}

/// The built-in catalog: 34 dishes per category at full portion.
pub fn builtin_catalog() -> Result<Catalog> {
    Catalog::new(parse_dishes_csv(BUILTIN_CATALOG_CSV)?)
}

/// Load a catalog from a `.csv` or `.json` file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    let dishes: Vec<Dish> = match extension.as_deref() {
        Some("csv") => parse_dishes_csv(&content)?,
        Some("json") => serde_json::from_str(&content)?,
        _ => {
            return Err(PlanError::InvalidInput(format!(
                "unsupported catalog format: {}",
                path.display()
            )));
        }
    };

    let catalog = Catalog::new(dishes)?;
    catalog.warn_duplicate_names();
    info!("loaded {} dishes from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Save a catalog as a JSON array of dishes.
pub fn save_catalog_json<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<()> {
    let dishes: Vec<&Dish> = catalog.all_dishes().collect();
    let json = serde_json::to_string_pretty(&dishes)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = builtin_catalog().unwrap();
        for category in Category::ALL {
            assert_eq!(catalog.dishes(category).len(), 34);
        }
        assert_eq!(catalog.warn_duplicate_names(), 0);
    }

    #[test]
    fn test_load_csv_with_quoted_names() {
        let csv = "category,name,calories,protein,lipids,carbs,cost\n\
                   breakfast,\"Eggs, toast and fruit\",380,18,14,45,70\n\
                   lunch,Stew,600,35,25,55,110\n\
                   dinner,Tacos,550,25,22,60,75\n";

        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.dishes(Category::Breakfast)[0].name, "Eggs, toast and fruit");
    }

    #[test]
    fn test_json_roundtrip() {
        let catalog = builtin_catalog().unwrap();
        let out = Builder::new().suffix(".json").tempfile().unwrap();
        save_catalog_json(out.path(), &catalog).unwrap();

        let reloaded = load_catalog(out.path()).unwrap();
        assert_eq!(reloaded, catalog);
    }

    #[test]
    fn test_load_rejects_negative_values() {
        let json = r#"[
            {"category": "lunch", "name": "Broken", "calories": -5, "protein": 1, "lipids": 1, "carbs": 1, "cost": 1}
        ]"#;
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        assert!(matches!(
            load_catalog(file.path()),
            Err(PlanError::InvalidDish { .. })
        ));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let file = Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(matches!(
            load_catalog(file.path()),
            Err(PlanError::InvalidInput(_))
        ));
    }
}
