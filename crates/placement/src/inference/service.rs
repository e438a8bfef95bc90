//! Assessment: probability, tier, uncertainty flag and feature priority in
//! one call.

use std::sync::Arc;

use tracing::debug;

use super::{PlacementModel, PredictError};
use crate::config::{ConfigError, PlacementConfig};
use crate::explainability::{ExplainError, FeatureInfluence, RankingPolicy};
use crate::features::FeatureVector;
use crate::tier::{RiskTier, TierThresholds, UncertaintyBand};
use crate::whatif::Session;

/// Everything shown for one assessed profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub probability: f64,
    pub tier: RiskTier,
    /// Probability falls inside the uncertainty band. Advisory only.
    pub uncertain: bool,
    /// Feature priority, or why it can't be shown. The probability and tier
    /// are valid either way.
    pub influences: Result<Vec<FeatureInfluence>, ExplainError>,
}

/// A shared model plus the presentation policy around it.
///
/// Cheap to clone; clones share the same model.
#[derive(Debug, Clone)]
pub struct PlacementService {
    model: Arc<PlacementModel>,
    thresholds: TierThresholds,
    uncertainty: UncertaintyBand,
    ranking: RankingPolicy,
}

impl PlacementService {
    /// Service with default thresholds, band and an unfiltered ranking.
    pub fn new(model: Arc<PlacementModel>) -> Self {
        Self {
            model,
            thresholds: TierThresholds::default(),
            uncertainty: UncertaintyBand::default(),
            ranking: RankingPolicy::all(),
        }
    }

    /// Service with the policies from a serving config.
    pub fn from_config(
        model: Arc<PlacementModel>,
        config: &PlacementConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            model,
            thresholds: config.thresholds()?,
            uncertainty: config.uncertainty_band()?,
            ranking: config.ranking_policy(),
        })
    }

    pub fn with_thresholds(mut self, thresholds: TierThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_uncertainty(mut self, band: UncertaintyBand) -> Self {
        self.uncertainty = band;
        self
    }

    pub fn with_ranking(mut self, policy: RankingPolicy) -> Self {
        self.ranking = policy;
        self
    }

    pub fn model(&self) -> &PlacementModel {
        &self.model
    }

    pub fn thresholds(&self) -> &TierThresholds {
        &self.thresholds
    }

    pub fn uncertainty(&self) -> &UncertaintyBand {
        &self.uncertainty
    }

    pub fn ranking(&self) -> &RankingPolicy {
        &self.ranking
    }

    /// Assess a profile without touching any session.
    pub fn assess(&self, vector: &FeatureVector) -> Result<Assessment, PredictError> {
        let probability = self.model.predict(vector)?;
        let tier = self.thresholds.classify(probability);
        let uncertain = self.uncertainty.contains(probability);
        let influences = self.model.influences(&self.ranking);
        debug!(probability, %tier, uncertain, "assessed profile");
        Ok(Assessment {
            probability,
            tier,
            uncertain,
            influences,
        })
    }

    /// Assess a profile and record it as the session's baseline.
    ///
    /// The baseline is only replaced when prediction succeeds.
    pub fn assess_in(
        &self,
        session: &mut Session,
        vector: FeatureVector,
    ) -> Result<Assessment, PredictError> {
        let assessment = self.assess(&vector)?;
        session.record(vector, assessment.probability);
        Ok(assessment)
    }
}
