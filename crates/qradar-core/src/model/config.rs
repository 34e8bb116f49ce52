use crate::model::sensor::NoisySensor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Additive belief increase applied to the 3x3 neighborhood of a confirmed hit.
pub const DEFAULT_BOOST: f64 = 0.3;

/// Immutable inputs for one search run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub height: usize,
    pub width: usize,
    pub num_targets: usize,
    #[serde(default)]
    pub false_positive: f64,
    #[serde(default)]
    pub false_negative: f64,
    #[serde(default = "default_boost")]
    pub boost: f64,
}

fn default_boost() -> f64 {
    DEFAULT_BOOST
}

impl RunConfig {
    pub const fn new(height: usize, width: usize, num_targets: usize) -> Self {
        Self {
            height,
            width,
            num_targets,
            false_positive: 0.0,
            false_negative: 0.0,
            boost: DEFAULT_BOOST,
        }
    }

    pub const fn with_noise(mut self, false_positive: f64, false_negative: f64) -> Self {
        self.false_positive = false_positive;
        self.false_negative = false_negative;
        self
    }

    pub const fn with_boost(mut self, boost: f64) -> Self {
        self.boost = boost;
        self
    }

    pub const fn cell_count(&self) -> usize {
        self.height * self.width
    }

    pub fn sensor(&self) -> NoisySensor {
        NoisySensor::new(self.false_positive, self.false_negative)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::EmptyGrid {
                height: self.height,
                width: self.width,
            });
        }

        if self.num_targets > self.cell_count() {
            return Err(ConfigError::TooManyTargets {
                requested: self.num_targets,
                cells: self.cell_count(),
            });
        }

        for (field, value) in [
            ("false_positive", self.false_positive),
            ("false_negative", self.false_negative),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { field, value });
            }
        }

        if !self.boost.is_finite() || self.boost < 0.0 {
            return Err(ConfigError::InvalidBoost { value: self.boost });
        }

        Ok(())
    }
}

/// Configuration rejected before any work happens.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid dimensions {height}x{width} contain no cells")]
    EmptyGrid { height: usize, width: usize },
    #[error("cannot place {requested} targets on a grid of {cells} cells")]
    TooManyTargets { requested: usize, cells: usize },
    #[error("{field} must lie in [0, 1], got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },
    #[error("boost must be finite and non-negative, got {value}")]
    InvalidBoost { value: f64 },
    #[error("target at ({row}, {col}) is outside the grid")]
    TargetOutOfBounds { row: usize, col: usize },
    #[error("target at ({row}, {col}) listed more than once")]
    DuplicateTarget { row: usize, col: usize },
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DEFAULT_BOOST, RunConfig};

    #[test]
    fn default_config_validates() {
        let config = RunConfig::new(5, 5, 3).with_noise(0.1, 0.1);
        assert!(config.validate().is_ok());
        assert_eq!(config.boost, DEFAULT_BOOST);
        assert_eq!(config.cell_count(), 25);
    }

    #[test]
    fn rejects_zero_dimension() {
        let err = RunConfig::new(0, 5, 0).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptyGrid {
                height: 0,
                width: 5
            }
        );
    }

    #[test]
    fn rejects_target_overflow() {
        let err = RunConfig::new(2, 2, 5).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::TooManyTargets {
                requested: 5,
                cells: 4
            }
        );
    }

    #[test]
    fn target_count_may_fill_the_grid() {
        assert!(RunConfig::new(2, 2, 4).validate().is_ok());
        assert!(RunConfig::new(2, 2, 0).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_rates() {
        let err = RunConfig::new(3, 3, 1)
            .with_noise(1.2, 0.0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RateOutOfRange {
                field: "false_positive",
                ..
            }
        ));

        let err = RunConfig::new(3, 3, 1)
            .with_noise(0.0, -0.1)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RateOutOfRange {
                field: "false_negative",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_or_nan_boost() {
        let err = RunConfig::new(3, 3, 1)
            .with_boost(-0.5)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBoost { .. }));

        let err = RunConfig::new(3, 3, 1)
            .with_boost(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBoost { .. }));
    }
}
