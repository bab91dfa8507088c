//! Annealing configuration and cooling schedule.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::planner::constants::{
    COOLING_RATE, INITIAL_TEMPERATURE, MAX_ITERATIONS, MIN_TEMPERATURE, REPETITION_PENALTY,
};

/// Configuration for the plan optimizer.
///
/// Temperature follows `initial_temperature * cooling_rate^t`, where `t`
/// counts every proposal, feasible or not.
///
/// # Examples
///
/// ```
/// use menu_planner_rs::planner::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(5_000.0)
///     .with_cooling_rate(0.98)
///     .with_max_iterations(2_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Temperature at step 0. Higher values accept worse plans more often.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1).
    pub cooling_rate: f64,

    /// The run stops once the temperature drops below this.
    pub min_temperature: f64,

    /// Hard ceiling on proposals.
    pub max_iterations: usize,

    /// Cost added per repeated dish occurrence.
    pub repetition_penalty: f64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: INITIAL_TEMPERATURE,
            cooling_rate: COOLING_RATE,
            min_temperature: MIN_TEMPERATURE,
            max_iterations: MAX_ITERATIONS,
            repetition_penalty: REPETITION_PENALTY,
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_repetition_penalty(mut self, penalty: f64) -> Self {
        self.repetition_penalty = penalty;
        self
    }

    /// Temperature at proposal `step`.
    pub fn temperature(&self, step: usize) -> f64 {
        let exponent = i32::try_from(step).unwrap_or(i32::MAX);
        self.initial_temperature * self.cooling_rate.powi(exponent)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature > 0.0) {
            return Err(PlanError::InvalidConfig(
                "initial_temperature must be positive".into(),
            ));
        }
        if !(self.min_temperature > 0.0) {
            return Err(PlanError::InvalidConfig(
                "min_temperature must be positive".into(),
            ));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(PlanError::InvalidConfig(
                "min_temperature must be less than initial_temperature".into(),
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(PlanError::InvalidConfig(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if !(self.repetition_penalty >= 0.0) {
            return Err(PlanError::InvalidConfig(format!(
                "repetition_penalty must be non-negative, got {}",
                self.repetition_penalty
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnnealingConfig::default();
        assert_eq!(config.initial_temperature, 10_000.0);
        assert_eq!(config.cooling_rate, 0.95);
        assert_eq!(config.repetition_penalty, 1_000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_geometric_schedule() {
        let config = AnnealingConfig::default();
        assert_eq!(config.temperature(0), 10_000.0);
        assert!((config.temperature(1) - 9_500.0).abs() < 1e-9);
        assert!((config.temperature(10) - 10_000.0 * 0.95_f64.powi(10)).abs() < 1e-9);
        assert!(config.temperature(400) < config.min_temperature);
    }

    #[test]
    fn test_validate_bad_cooling_rate() {
        assert!(AnnealingConfig::default().with_cooling_rate(1.0).validate().is_err());
        assert!(AnnealingConfig::default().with_cooling_rate(0.0).validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = AnnealingConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(2.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_nan_temperature() {
        let config = AnnealingConfig::default().with_initial_temperature(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let config: AnnealingConfig = serde_json::from_str(r#"{"cooling_rate": 0.9}"#).unwrap();
        assert_eq!(config.cooling_rate, 0.9);
        assert_eq!(config.max_iterations, MAX_ITERATIONS);
    }
}
