//! Serving and training configuration.
//!
//! [`PlacementConfig`] is the optional `placement.toml` read by a serving
//! process. Every field has a default, so an empty file is valid:
//!
//! ```toml
//! artifact_path = "model.json"
//!
//! [tiers]
//! high = 0.70
//! moderate = 0.40
//!
//! [uncertainty]
//! low = 0.45
//! high = 0.55
//!
//! [ranking]
//! exclude = ["backlogs"]
//! ```
//!
//! Training settings live in [`TrainerConfig`], built with a validating
//! builder.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::explainability::RankingPolicy;
use crate::tier::{ThresholdError, TierThresholds, UncertaintyBand};

pub use crate::training::{CalibrationConfig, TrainerConfig};

/// Default artifact location, relative to the application root.
pub const DEFAULT_ARTIFACT_PATH: &str = "model.json";

// =============================================================================
// ConfigError
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Thresholds(#[from] ThresholdError),

    #[error("test_fraction must be in (0, 1), got {0}")]
    InvalidTestFraction(f64),

    #[error("calibration needs at least 2 folds, got {0}")]
    InvalidFolds(usize),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("max_iter must be at least 1")]
    InvalidMaxIter,
}

// =============================================================================
// PlacementConfig
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TierSection {
    pub high: f64,
    pub moderate: f64,
}

impl Default for TierSection {
    fn default() -> Self {
        Self {
            high: TierThresholds::DEFAULT_HIGH,
            moderate: TierThresholds::DEFAULT_MODERATE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UncertaintySection {
    pub low: f64,
    pub high: f64,
}

impl Default for UncertaintySection {
    fn default() -> Self {
        let band = UncertaintyBand::default();
        Self {
            low: band.low(),
            high: band.high(),
        }
    }
}

/// Serving configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlacementConfig {
    pub artifact_path: PathBuf,
    pub tiers: TierSection,
    pub uncertainty: UncertaintySection,
    pub ranking: RankingPolicy,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            tiers: TierSection::default(),
            uncertainty: UncertaintySection::default(),
            ranking: RankingPolicy::all(),
        }
    }
}

impl PlacementConfig {
    /// Read a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Read the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.thresholds()?;
        config.uncertainty_band()?;
        Ok(config)
    }

    pub fn thresholds(&self) -> Result<TierThresholds, ConfigError> {
        Ok(TierThresholds::new(self.tiers.high, self.tiers.moderate)?)
    }

    pub fn uncertainty_band(&self) -> Result<UncertaintyBand, ConfigError> {
        Ok(UncertaintyBand::new(self.uncertainty.low, self.uncertainty.high)?)
    }

    pub fn ranking_policy(&self) -> RankingPolicy {
        self.ranking.clone()
    }

    /// The artifact path, resolved against `root` when relative.
    pub fn artifact_path_in(&self, root: impl AsRef<Path>) -> PathBuf {
        if self.artifact_path.is_absolute() {
            self.artifact_path.clone()
        } else {
            root.as_ref().join(&self.artifact_path)
        }
    }

    /// The artifact path, resolved against the directory holding
    /// `config_file`. A bare file name resolves against the working
    /// directory.
    pub fn artifact_path_for(&self, config_file: impl AsRef<Path>) -> PathBuf {
        let root = config_file
            .as_ref()
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        self.artifact_path_in(root)
    }
}
