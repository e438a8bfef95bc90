//! Global feature priority.

use serde::{Deserialize, Serialize};

use super::{weights, ExplainError};
use crate::features::Feature;
use crate::repr::Artifact;

/// One feature's learned coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureInfluence {
    pub feature: Feature,
    /// Signed coefficient in scaled space.
    pub weight: f64,
    /// `|weight|`.
    pub magnitude: f64,
}

impl FeatureInfluence {
    pub fn new(feature: Feature, weight: f64) -> Self {
        Self {
            feature,
            weight,
            magnitude: weight.abs(),
        }
    }

    /// Whether raising this feature raises the placement probability.
    pub fn is_positive(&self) -> bool {
        self.weight > 0.0
    }
}

/// Which features a ranking shows.
///
/// A view filter only: excluded features still take part in prediction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingPolicy {
    #[serde(default)]
    pub exclude: Vec<Feature>,
}

impl RankingPolicy {
    /// Show every feature.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn excluding(features: impl IntoIterator<Item = Feature>) -> Self {
        Self {
            exclude: features.into_iter().collect(),
        }
    }

    #[inline]
    pub fn admits(&self, feature: Feature) -> bool {
        !self.exclude.contains(&feature)
    }
}

/// Rank an artifact's coefficients, assuming canonical column order.
pub fn rank_influences(
    artifact: &Artifact,
    policy: &RankingPolicy,
) -> Result<Vec<FeatureInfluence>, ExplainError> {
    rank_columns(artifact, &Feature::ALL, policy)
}

/// Rank an artifact's coefficients, with `columns[i]` naming column `i`.
///
/// Sorted by magnitude, descending. Ties keep column order.
pub fn rank_columns(
    artifact: &Artifact,
    columns: &[Feature],
    policy: &RankingPolicy,
) -> Result<Vec<FeatureInfluence>, ExplainError> {
    let classifier = weights(artifact)?;
    if classifier.n_features() != columns.len() {
        return Err(ExplainError::ColumnMismatch {
            expected: columns.len(),
            got: classifier.n_features(),
        });
    }

    let mut ranked: Vec<FeatureInfluence> = columns
        .iter()
        .enumerate()
        .filter(|&(_, &feature)| policy.admits(feature))
        .map(|(i, &feature)| FeatureInfluence::new(feature, classifier.weight(i)))
        .collect();
    // Stable: equal magnitudes stay in column order.
    ranked.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
    Ok(ranked)
}
