//! Engine Configuration
//!
//! Input parameters handed to the engine by whatever front end drives it,
//! plus the validation that guards every mutation.

use crate::pc_interface::{Hour, OnlinePeriod, Probability, HOURS_PER_DAY, MAX_PERIODS};
use std::fmt;

pub const MIN_ROUND_DURATION_HOURS: Hour = 1;
pub const MAX_ROUND_DURATION_HOURS: Hour = 48;

pub const MIN_INPUT_SAMPLE_SIZE: usize = 100;
pub const MAX_INPUT_SAMPLE_SIZE: usize = 200_000;

pub const MIN_TARGET_COVERAGE: f64 = 0.90;
pub const MAX_TARGET_COVERAGE: f64 = 0.99999;

/// Full parameter set for one engine evaluation
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Up to three online periods, first match wins on overlap
    pub periods: Vec<OnlinePeriod>,

    /// Reachability for hours outside every active period
    pub baseline_probability: Probability,

    /// Length of one delivery round (hours)
    pub round_duration_hours: Hour,

    /// Synthetic recipients drawn for the fixed-order estimate
    pub sample_size: usize,

    /// Coverage the caller wants to reach (fraction)
    pub target_coverage: f64,

    /// Total users, used to turn coverage into head counts
    pub population: u64,

    /// Seed for the fixed-order sample (None = draw from entropy)
    pub seed: Option<[u8; 32]>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            periods: vec![OnlinePeriod::new(17, 23, 0.6)],
            baseline_probability: 0.0,
            round_duration_hours: 20,
            sample_size: 10_000,
            target_coverage: 0.999,
            population: 10_000_000,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Check every field against the accepted input ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_periods(&self.periods)?;
        validate_baseline(self.baseline_probability)?;
        validate_round_duration(self.round_duration_hours)?;
        validate_sample_size(self.sample_size)?;
        validate_target(self.target_coverage)?;
        validate_population(self.population)?;
        Ok(())
    }

    /// Resolve the configured seed or draw a fresh one
    pub fn resolve_seed(&self) -> [u8; 32] {
        self.seed.unwrap_or_else(|| {
            use rand::RngCore;
            let mut seed = [0u8; 32];
            rand::thread_rng().fill_bytes(&mut seed);
            seed
        })
    }
}

pub fn validate_periods(periods: &[OnlinePeriod]) -> Result<(), ConfigError> {
    if periods.len() > MAX_PERIODS {
        return Err(ConfigError::TooManyPeriods {
            count: periods.len(),
        });
    }

    for (index, period) in periods.iter().enumerate() {
        // start >= end is allowed: such a period is simply inert
        if period.start >= HOURS_PER_DAY || period.end < 1 || period.end > HOURS_PER_DAY {
            return Err(ConfigError::PeriodHoursOutOfRange {
                index,
                start: period.start,
                end: period.end,
            });
        }
        if !is_probability(period.probability) {
            return Err(ConfigError::ProbabilityOutOfRange {
                index,
                probability: period.probability,
            });
        }
    }

    Ok(())
}

pub fn validate_baseline(baseline: Probability) -> Result<(), ConfigError> {
    if is_probability(baseline) {
        Ok(())
    } else {
        Err(ConfigError::BaselineOutOfRange { baseline })
    }
}

pub fn validate_round_duration(hours: Hour) -> Result<(), ConfigError> {
    if (MIN_ROUND_DURATION_HOURS..=MAX_ROUND_DURATION_HOURS).contains(&hours) {
        Ok(())
    } else {
        Err(ConfigError::RoundDurationOutOfRange { hours })
    }
}

pub fn validate_sample_size(size: usize) -> Result<(), ConfigError> {
    if (MIN_INPUT_SAMPLE_SIZE..=MAX_INPUT_SAMPLE_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(ConfigError::SampleSizeOutOfRange { size })
    }
}

pub fn validate_target(target: f64) -> Result<(), ConfigError> {
    if (MIN_TARGET_COVERAGE..=MAX_TARGET_COVERAGE).contains(&target) {
        Ok(())
    } else {
        Err(ConfigError::TargetOutOfRange { target })
    }
}

pub fn validate_population(population: u64) -> Result<(), ConfigError> {
    if population > 0 {
        Ok(())
    } else {
        Err(ConfigError::PopulationOutOfRange { population })
    }
}

fn is_probability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

// ============================================================================
// Errors
// ============================================================================

/// Rejected input parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// More periods than the engine holds
    TooManyPeriods { count: usize },

    /// Start outside 0..=23 or end outside 1..=24
    PeriodHoursOutOfRange { index: usize, start: Hour, end: Hour },

    /// Period probability outside [0, 1]
    ProbabilityOutOfRange { index: usize, probability: Probability },

    /// Baseline reachability outside [0, 1]
    BaselineOutOfRange { baseline: Probability },

    /// Round duration outside 1..=48 hours
    RoundDurationOutOfRange { hours: Hour },

    /// Sample size outside 100..=200000
    SampleSizeOutOfRange { size: usize },

    /// Target coverage outside [0.90, 0.99999]
    TargetOutOfRange { target: f64 },

    /// Empty population
    PopulationOutOfRange { population: u64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TooManyPeriods { count } => {
                write!(f, "{} online periods given, at most {} allowed", count, MAX_PERIODS)
            }
            ConfigError::PeriodHoursOutOfRange { index, start, end } => write!(
                f,
                "period {}: hours {}..{} out of range (start 0-23, end 1-24)",
                index, start, end
            ),
            ConfigError::ProbabilityOutOfRange { index, probability } => write!(
                f,
                "period {}: probability {} outside [0, 1]",
                index, probability
            ),
            ConfigError::BaselineOutOfRange { baseline } => {
                write!(f, "baseline probability {} outside [0, 1]", baseline)
            }
            ConfigError::RoundDurationOutOfRange { hours } => write!(
                f,
                "round duration {}h outside {}-{}h",
                hours, MIN_ROUND_DURATION_HOURS, MAX_ROUND_DURATION_HOURS
            ),
            ConfigError::SampleSizeOutOfRange { size } => write!(
                f,
                "sample size {} outside {}-{}",
                size, MIN_INPUT_SAMPLE_SIZE, MAX_INPUT_SAMPLE_SIZE
            ),
            ConfigError::TargetOutOfRange { target } => write!(
                f,
                "target coverage {} outside [{}, {}]",
                target, MIN_TARGET_COVERAGE, MAX_TARGET_COVERAGE
            ),
            ConfigError::PopulationOutOfRange { population } => {
                write!(f, "population {} must be positive", population)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.baseline_probability, 0.0);
        assert_eq!(config.round_duration_hours, 20);
    }

    #[test]
    fn test_inverted_period_is_not_an_error() {
        let mut config = EngineConfig::default();
        config.periods = vec![OnlinePeriod::new(20, 10, 0.5)];
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_fourth_period() {
        let mut config = EngineConfig::default();
        config.periods = vec![OnlinePeriod::new(0, 1, 0.5); 4];
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyPeriods { count: 4 })
        );
    }

    #[test]
    fn test_rejects_out_of_range_hours() {
        let result = validate_periods(&[OnlinePeriod::new(3, 4, 0.5), OnlinePeriod::new(24, 24, 0.5)]);
        assert_eq!(
            result,
            Err(ConfigError::PeriodHoursOutOfRange {
                index: 1,
                start: 24,
                end: 24
            })
        );

        assert!(validate_periods(&[OnlinePeriod::new(0, 25, 0.5)]).is_err());
        assert!(validate_periods(&[OnlinePeriod::new(0, 0, 0.5)]).is_err());
    }

    #[test]
    fn test_rejects_bad_probabilities() {
        assert!(validate_periods(&[OnlinePeriod::new(1, 2, 1.5)]).is_err());
        assert!(validate_periods(&[OnlinePeriod::new(1, 2, f64::NAN)]).is_err());
        assert!(validate_baseline(-0.1).is_err());
        assert!(validate_baseline(0.2).is_ok());
    }

    #[test]
    fn test_scalar_ranges() {
        assert!(validate_round_duration(0).is_err());
        assert!(validate_round_duration(1).is_ok());
        assert!(validate_round_duration(48).is_ok());
        assert!(validate_round_duration(49).is_err());

        assert!(validate_sample_size(99).is_err());
        assert!(validate_sample_size(200_000).is_ok());
        assert!(validate_sample_size(200_001).is_err());

        assert!(validate_target(0.89).is_err());
        assert!(validate_target(0.90).is_ok());
        assert!(validate_target(0.99999).is_ok());
        assert!(validate_target(1.0).is_err());

        assert!(validate_population(0).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::RoundDurationOutOfRange { hours: 72 };
        assert_eq!(err.to_string(), "round duration 72h outside 1-48h");
    }

    #[test]
    fn test_resolve_seed_keeps_explicit_seed() {
        let mut config = EngineConfig::default();
        config.seed = Some([7u8; 32]);
        assert_eq!(config.resolve_seed(), [7u8; 32]);
    }
}
