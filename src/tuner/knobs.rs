use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::planner::AnnealingConfig;
use crate::planner::constants::{COOLING_RATE, INITIAL_TEMPERATURE, MIN_TEMPERATURE};

/// Annealing schedule knobs explored by the tuner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnealingKnobs {
    pub initial_temperature: f64,
    pub cooling_rate: f64,
    pub min_temperature: f64,
}

impl Default for AnnealingKnobs {
    fn default() -> Self {
        Self {
            initial_temperature: INITIAL_TEMPERATURE,
            cooling_rate: COOLING_RATE,
            min_temperature: MIN_TEMPERATURE,
        }
    }
}

impl AnnealingKnobs {
    /// Generate random knobs within the given ranges.
    ///
    /// Temperatures are drawn log-uniformly since they span orders of magnitude.
    pub fn random(rng: &mut impl Rng, ranges: &KnobRanges) -> Self {
        Self {
            initial_temperature: log_uniform(rng, ranges.initial_temperature),
            cooling_rate: rng.gen_range(ranges.cooling_rate.0..=ranges.cooling_rate.1),
            min_temperature: log_uniform(rng, ranges.min_temperature),
        }
    }

    /// Format knobs as a compact string for display.
    pub fn display(&self) -> String {
        format!(
            "t0={:.1} rate={:.4} tmin={:.2e}",
            self.initial_temperature, self.cooling_rate, self.min_temperature
        )
    }

    /// Apply the knobs to a base configuration.
    pub fn to_config(&self, base: &AnnealingConfig) -> AnnealingConfig {
        base.with_initial_temperature(self.initial_temperature)
            .with_cooling_rate(self.cooling_rate)
            .with_min_temperature(self.min_temperature)
    }
}

fn log_uniform(rng: &mut impl Rng, (lo, hi): (f64, f64)) -> f64 {
    rng.gen_range(lo.ln()..=hi.ln()).exp()
}

/// Min/max ranges for each tunable knob.
#[derive(Debug, Clone)]
pub struct KnobRanges {
    pub initial_temperature: (f64, f64),
    /// Kept strictly inside (0, 1).
    pub cooling_rate: (f64, f64),
    /// Upper end stays below the initial temperature range.
    pub min_temperature: (f64, f64),
}

impl Default for KnobRanges {
    fn default() -> Self {
        Self {
            initial_temperature: (100.0, 50_000.0),
            cooling_rate: (0.90, 0.999),
            min_temperature: (1e-4, 10.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_knobs_match_constants() {
        let knobs = AnnealingKnobs::default();
        assert_eq!(knobs.initial_temperature, INITIAL_TEMPERATURE);
        assert_eq!(knobs.cooling_rate, COOLING_RATE);
        assert_eq!(knobs.min_temperature, MIN_TEMPERATURE);
        assert_eq!(
            knobs.to_config(&AnnealingConfig::default()),
            AnnealingConfig::default()
        );
    }

    #[test]
    fn test_random_knobs_within_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let ranges = KnobRanges::default();

        for _ in 0..100 {
            let knobs = AnnealingKnobs::random(&mut rng, &ranges);
            assert!(knobs.initial_temperature >= ranges.initial_temperature.0 * 0.999_999);
            assert!(knobs.initial_temperature <= ranges.initial_temperature.1 * 1.000_001);
            assert!(knobs.cooling_rate >= ranges.cooling_rate.0);
            assert!(knobs.cooling_rate <= ranges.cooling_rate.1);
            assert!(knobs.min_temperature >= ranges.min_temperature.0 * 0.999_999);
            assert!(knobs.min_temperature <= ranges.min_temperature.1 * 1.000_001);
        }
    }

    #[test]
    fn test_random_knobs_make_valid_configs() {
        let mut rng = StdRng::seed_from_u64(7);
        let base = AnnealingConfig::default();
        for _ in 0..100 {
            let knobs = AnnealingKnobs::random(&mut rng, &KnobRanges::default());
            assert!(knobs.to_config(&base).validate().is_ok());
        }
    }
}
