use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::NutrientBounds;
use crate::planner::AnnealingConfig;

/// Planner settings loadable from a JSON file.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub annealing: AnnealingConfig,

    /// Add scaled portion variants to the catalog before searching.
    pub expand_portions: bool,

    /// Explicit bounds; when set they replace the computed ones.
    pub bounds: Option<NutrientBounds>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            annealing: AnnealingConfig::default(),
            expand_portions: true,
            bounds: None,
        }
    }
}

impl PlannerConfig {
    /// Check the annealing parameters and any explicit bounds.
    pub fn validate(&self) -> Result<()> {
        self.annealing.validate()?;
        if let Some(bounds) = &self.bounds {
            bounds.validate()?;
        }
        Ok(())
    }
}

/// Load and validate a planner config from a JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlannerConfig> {
    let content = fs::read_to_string(path)?;
    let config: PlannerConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_when_fields_missing() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert!(config.expand_portions);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{
            "annealing": {"max_iterations": 250},
            "expand_portions": false,
            "bounds": {
                "min_calories": 1800, "max_calories": 2200,
                "min_protein": 50, "max_protein": 150,
                "min_lipids": 40, "max_lipids": 90,
                "min_carbs": 200, "max_carbs": 350
            }
        }"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.annealing.max_iterations, 250);
        assert_eq!(config.annealing.cooling_rate, 0.95);
        assert!(!config.expand_portions);
        assert_eq!(config.bounds.map(|b| b.max_carbs), Some(350.0));
    }

    #[test]
    fn test_rejects_invalid_annealing() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"annealing": {"cooling_rate": 2.0}}"#).unwrap();

        assert!(matches!(
            load_config(file.path()),
            Err(PlanError::InvalidConfig(_))
        ));
    }
}
