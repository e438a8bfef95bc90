//! Risk tiers and the uncertainty band.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse placement-chance bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::High => "High Chance of Placement",
            RiskTier::Moderate => "Moderate Chance of Placement",
            RiskTier::Low => "Low Chance of Placement",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskTier::High => "HIGH",
            RiskTier::Moderate => "MODERATE",
            RiskTier::Low => "LOW",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ThresholdError {
    #[error("tier thresholds must satisfy 0 <= moderate <= high <= 1, got moderate={moderate}, high={high}")]
    InvalidThresholds { high: f64, moderate: f64 },

    #[error("uncertainty band must satisfy 0 <= low <= high <= 1, got low={low}, high={high}")]
    InvalidBand { low: f64, high: f64 },
}

// =============================================================================
// TierThresholds
// =============================================================================

/// Inclusive lower bounds for the High and Moderate tiers.
///
/// `p >= high` is High, `moderate <= p < high` is Moderate, everything below
/// is Low. Defaults are 0.70 and 0.40.
///
/// # Example
///
/// ```
/// use placement::tier::{RiskTier, TierThresholds};
///
/// let tiers = TierThresholds::default();
/// assert_eq!(tiers.classify(0.70), RiskTier::High);
/// assert_eq!(tiers.classify(0.6999), RiskTier::Moderate);
/// assert_eq!(tiers.classify(0.40), RiskTier::Moderate);
/// assert_eq!(tiers.classify(0.3999), RiskTier::Low);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThresholds {
    high: f64,
    moderate: f64,
}

impl TierThresholds {
    pub const DEFAULT_HIGH: f64 = 0.70;
    pub const DEFAULT_MODERATE: f64 = 0.40;

    pub fn new(high: f64, moderate: f64) -> Result<Self, ThresholdError> {
        let ordered = (0.0..=1.0).contains(&moderate)
            && (0.0..=1.0).contains(&high)
            && moderate <= high;
        if !ordered {
            return Err(ThresholdError::InvalidThresholds { high, moderate });
        }
        Ok(Self { high, moderate })
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn moderate(&self) -> f64 {
        self.moderate
    }

    /// Tier for a probability. NaN falls through to Low.
    pub fn classify(&self, probability: f64) -> RiskTier {
        if probability >= self.high {
            RiskTier::High
        } else if probability >= self.moderate {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            high: Self::DEFAULT_HIGH,
            moderate: Self::DEFAULT_MODERATE,
        }
    }
}

// =============================================================================
// UncertaintyBand
// =============================================================================

/// Inclusive probability band flagged as a near coin-flip.
///
/// Advisory only; it never changes the tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncertaintyBand {
    low: f64,
    high: f64,
}

impl UncertaintyBand {
    pub fn new(low: f64, high: f64) -> Result<Self, ThresholdError> {
        let ordered = (0.0..=1.0).contains(&low) && (0.0..=1.0).contains(&high) && low <= high;
        if !ordered {
            return Err(ThresholdError::InvalidBand { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    #[inline]
    pub fn contains(&self, probability: f64) -> bool {
        probability >= self.low && probability <= self.high
    }
}

impl Default for UncertaintyBand {
    fn default() -> Self {
        Self {
            low: 0.45,
            high: 0.55,
        }
    }
}
