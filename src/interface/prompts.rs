use std::str::FromStr;

use dialoguer::{Input, Select};

use crate::error::{PlanError, Result};
use crate::planner::{ActivityLevel, BodyMetrics, Sex};

/// Prompt for a positive number with a default.
fn prompt_positive<T>(prompt: &str, default: &str) -> Result<T>
where
    T: FromStr + PartialOrd + Default,
{
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    let value: T = input
        .trim()
        .parse()
        .map_err(|_| PlanError::InvalidInput(format!("Invalid number: {}", input)))?;

    if value <= T::default() {
        return Err(PlanError::InvalidInput(format!(
            "{} must be greater than zero",
            prompt
        )));
    }
    Ok(value)
}

/// Prompt for the number of days to plan.
pub fn prompt_days() -> Result<usize> {
    prompt_positive("How many days should the plan cover?", "7")
}

/// Prompt for body weight in kilograms.
pub fn prompt_weight() -> Result<f64> {
    prompt_positive("Weight (kg)", "70")
}

/// Prompt for height in centimetres.
pub fn prompt_height() -> Result<f64> {
    prompt_positive("Height (cm)", "170")
}

/// Prompt for age in years.
pub fn prompt_age() -> Result<f64> {
    prompt_positive("Age (years)", "30")
}

/// Prompt for sex.
pub fn prompt_sex() -> Result<Sex> {
    let options = ["Male", "Female", "Other / prefer not to say"];
    let selection = Select::new()
        .with_prompt("Sex")
        .items(&options)
        .default(2)
        .interact()?;

    Ok(match selection {
        0 => Sex::Male,
        1 => Sex::Female,
        _ => Sex::Other,
    })
}

/// Prompt for activity level.
pub fn prompt_activity() -> Result<ActivityLevel> {
    let options = [
        "Sedentary (little or no exercise)",
        "Light (1-3 days/week)",
        "Moderate (3-5 days/week)",
        "Active (6-7 days/week)",
        "Very active (physical job or twice daily)",
    ];
    let selection = Select::new()
        .with_prompt("Activity level")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(match selection {
        1 => ActivityLevel::Light,
        2 => ActivityLevel::Moderate,
        3 => ActivityLevel::Active,
        4 => ActivityLevel::VeryActive,
        _ => ActivityLevel::Sedentary,
    })
}

/// Body metrics given on the command line; missing ones are prompted for.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialMetrics {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age_years: Option<f64>,
    pub sex: Option<Sex>,
    pub activity: Option<ActivityLevel>,
}

impl PartialMetrics {
    /// All five measurements, or `None` if any still has to be asked for.
    pub fn complete(&self) -> Option<BodyMetrics> {
        Some(BodyMetrics {
            weight_kg: self.weight_kg?,
            height_cm: self.height_cm?,
            age_years: self.age_years?,
            sex: self.sex?,
            activity: self.activity?,
        })
    }
}

/// Collect body metrics, prompting only for what is missing.
pub fn collect_body_metrics(partial: PartialMetrics) -> Result<BodyMetrics> {
    let weight_kg = match partial.weight_kg {
        Some(w) => w,
        None => prompt_weight()?,
    };
    let height_cm = match partial.height_cm {
        Some(h) => h,
        None => prompt_height()?,
    };
    let age_years = match partial.age_years {
        Some(a) => a,
        None => prompt_age()?,
    };
    let sex = match partial.sex {
        Some(s) => s,
        None => prompt_sex()?,
    };
    let activity = match partial.activity {
        Some(a) => a,
        None => prompt_activity()?,
    };

    let metrics = BodyMetrics {
        weight_kg,
        height_cm,
        age_years,
        sex,
        activity,
    };
    metrics.validate()?;
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_metrics_complete() {
        let partial = PartialMetrics {
            weight_kg: Some(60.0),
            height_cm: Some(165.0),
            age_years: Some(40.0),
            sex: Some(Sex::Female),
            activity: Some(ActivityLevel::Moderate),
        };
        let metrics = partial.complete().unwrap();
        assert_eq!(metrics.weight_kg, 60.0);
        assert_eq!(metrics.sex, Sex::Female);
        assert_eq!(metrics.activity, ActivityLevel::Moderate);

        let missing = PartialMetrics {
            height_cm: None,
            ..partial
        };
        assert!(missing.complete().is_none());
    }

    #[test]
    fn test_missing_sex_or_activity_is_incomplete() {
        let measurements = PartialMetrics {
            weight_kg: Some(60.0),
            height_cm: Some(165.0),
            age_years: Some(40.0),
            ..Default::default()
        };
        assert!(measurements.complete().is_none());

        let no_activity = PartialMetrics {
            sex: Some(Sex::Male),
            ..measurements
        };
        assert!(no_activity.complete().is_none());

        let no_sex = PartialMetrics {
            activity: Some(ActivityLevel::Light),
            ..measurements
        };
        assert!(no_sex.complete().is_none());
    }
}
