//! Trainer configuration with builder pattern.
//!
//! # Example
//!
//! ```
//! use placement::training::{CalibrationConfig, TrainerConfig};
//!
//! // Plain pipeline, sklearn defaults
//! let config = TrainerConfig::builder().build().unwrap();
//! assert_eq!(config.test_fraction, 0.2);
//!
//! // Calibrated ensemble over 5 folds
//! let config = TrainerConfig::builder()
//!     .calibration(CalibrationConfig { folds: 5, ensemble: true })
//!     .build()
//!     .unwrap();
//! assert!(config.calibration.is_some());
//!
//! assert!(TrainerConfig::builder().c(0.0).build().is_err());
//! ```

use bon::Builder;
use serde::{Deserialize, Serialize};

use super::Verbosity;
use crate::config::ConfigError;

/// Sigmoid calibration over stratified folds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Number of stratified folds. Default: 5.
    pub folds: usize,
    /// Keep one calibrated pipeline per fold and average them, instead of a
    /// single pipeline on all rows with one calibrator.
    pub ensemble: bool,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            folds: 5,
            ensemble: false,
        }
    }
}

/// Offline training settings.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct TrainerConfig {
    /// Share of rows held out for evaluation. Default: 0.2.
    #[builder(default = 0.2)]
    pub test_fraction: f64,

    /// Seed for the train/test shuffle. Default: 42.
    #[builder(default = 42)]
    pub seed: u64,

    /// Inverse L2 strength. Default: 1.0.
    #[builder(default = 1.0)]
    pub c: f64,

    /// Solver tolerance on the largest coordinate step. Default: 1e-4.
    #[builder(default = 1e-4)]
    pub tol: f64,

    /// Maximum coordinate descent sweeps. Default: 100.
    #[builder(default = 100)]
    pub max_iter: usize,

    /// `None` produces a plain pipeline.
    pub calibration: Option<CalibrationConfig>,

    /// Default: `Warning`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

impl<S: trainer_config_builder::IsComplete> TrainerConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// - `test_fraction` outside (0, 1)
    /// - fewer than 2 calibration folds
    /// - `c <= 0` or `tol <= 0`
    /// - `max_iter == 0`
    pub fn build(self) -> Result<TrainerConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl TrainerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(ConfigError::InvalidTestFraction(self.test_fraction));
        }
        if let Some(cal) = &self.calibration {
            if cal.folds < 2 {
                return Err(ConfigError::InvalidFolds(cal.folds));
            }
        }
        if self.c.is_nan() || self.c <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "c",
                value: self.c,
            });
        }
        if self.tol.is_nan() || self.tol <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "tol",
                value: self.tol,
            });
        }
        if self.max_iter == 0 {
            return Err(ConfigError::InvalidMaxIter);
        }
        Ok(())
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self::builder().build().expect("default config is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TrainerConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.c, 1.0);
        assert_eq!(config.max_iter, 100);
        assert_eq!(config.calibration, None);
        assert_eq!(config.verbosity, Verbosity::Warning);
        assert_eq!(CalibrationConfig::default().folds, 5);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            TrainerConfig::builder().test_fraction(1.0).build(),
            Err(ConfigError::InvalidTestFraction(_))
        ));
        assert!(matches!(
            TrainerConfig::builder().test_fraction(f64::NAN).build(),
            Err(ConfigError::InvalidTestFraction(_))
        ));
        assert!(matches!(
            TrainerConfig::builder()
                .calibration(CalibrationConfig { folds: 1, ensemble: false })
                .build(),
            Err(ConfigError::InvalidFolds(1))
        ));
        assert!(matches!(
            TrainerConfig::builder().tol(-1.0).build(),
            Err(ConfigError::NonPositive { field: "tol", .. })
        ));
        assert!(matches!(
            TrainerConfig::builder().c(f64::NAN).build(),
            Err(ConfigError::NonPositive { field: "c", .. })
        ));
        assert!(matches!(
            TrainerConfig::builder().c(-0.5).build(),
            Err(ConfigError::NonPositive { field: "c", .. })
        ));
        assert!(matches!(
            TrainerConfig::builder().tol(f64::NAN).build(),
            Err(ConfigError::NonPositive { field: "tol", .. })
        ));
        assert!(matches!(
            TrainerConfig::builder().max_iter(0).build(),
            Err(ConfigError::InvalidMaxIter)
        ));
    }
}
