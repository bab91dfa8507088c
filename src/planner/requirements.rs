use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::NutrientBounds;
use crate::planner::constants::*;

/// Sex used by the energy formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Other,
}

/// Physical activity level, mapped to an expenditure multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Body metrics a plan request is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMetrics {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: f64,
    pub sex: Sex,
    pub activity: ActivityLevel,
}

impl BodyMetrics {
    /// Reject non-positive or non-finite measurements.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("weight", self.weight_kg),
            ("height", self.height_cm),
            ("age", self.age_years),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlanError::InvalidInput(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn bmi(&self) -> f64 {
        bmi(self.weight_kg, self.height_cm)
    }
}

/// Body mass index: weight / height(m)^2.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// WHO label for a BMI value.
pub fn bmi_category(bmi: f64) -> &'static str {
    match bmi {
        b if b < 18.5 => "underweight",
        b if b < 25.0 => "normal",
        b if b < 30.0 => "overweight",
        _ => "obese",
    }
}

/// Resting energy (Mifflin-St Jeor), kcal/day.
pub fn basal_metabolic_rate(metrics: &BodyMetrics) -> f64 {
    let sex_offset = match metrics.sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
        Sex::Other => -78.0,
    };
    10.0 * metrics.weight_kg + 6.25 * metrics.height_cm - 5.0 * metrics.age_years + sex_offset
}

/// Estimated daily expenditure, kcal/day.
pub fn daily_energy_expenditure(metrics: &BodyMetrics) -> f64 {
    basal_metabolic_rate(metrics) * metrics.activity.factor()
}

/// Compute the per-day nutrient bounds for a person.
///
/// Calories span the expenditure +/-10 %. Macro minimums use the calorie
/// minimum and macro maximums use the calorie maximum.
pub fn compute_bounds(metrics: &BodyMetrics) -> Result<NutrientBounds> {
    metrics.validate()?;

    let tdee = daily_energy_expenditure(metrics);
    if tdee <= 0.0 {
        return Err(PlanError::InvalidInput(format!(
            "estimated energy expenditure is not positive ({:.0} kcal)",
            tdee
        )));
    }

    let min_calories = tdee * CALORIE_LOWER_FACTOR;
    let max_calories = tdee * CALORIE_UPPER_FACTOR;

    Ok(NutrientBounds {
        min_calories,
        max_calories,
        min_protein: min_calories * PROTEIN_ENERGY_SHARE.0 / KCAL_PER_GRAM_PROTEIN,
        max_protein: max_calories * PROTEIN_ENERGY_SHARE.1 / KCAL_PER_GRAM_PROTEIN,
        min_lipids: min_calories * LIPIDS_ENERGY_SHARE.0 / KCAL_PER_GRAM_LIPIDS,
        max_lipids: max_calories * LIPIDS_ENERGY_SHARE.1 / KCAL_PER_GRAM_LIPIDS,
        min_carbs: min_calories * CARBS_ENERGY_SHARE.0 / KCAL_PER_GRAM_CARBS,
        max_carbs: max_calories * CARBS_ENERGY_SHARE.1 / KCAL_PER_GRAM_CARBS,
    })
}
