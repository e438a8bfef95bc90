//! The trained artifact as a tagged variant.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CalibratedEnsemble, CalibratedModel, Pipeline};

/// A trained placement model.
///
/// Each shape predicts; only [`Artifact::Plain`] and [`Artifact::Calibrated`]
/// expose a single linear boundary for explanation.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    /// Scaler + logistic regression.
    Plain(Pipeline),
    /// Pipeline wrapped in one sigmoid calibrator.
    Calibrated(CalibratedModel),
    /// Per-fold calibrated pipelines, probabilities averaged.
    Ensemble(CalibratedEnsemble),
}

/// Discriminant of an [`Artifact`], for logs and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Plain,
    Calibrated,
    Ensemble,
}

impl ArtifactKind {
    pub const fn name(self) -> &'static str {
        match self {
            ArtifactKind::Plain => "plain",
            ArtifactKind::Calibrated => "calibrated",
            ArtifactKind::Ensemble => "ensemble",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Artifact {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Artifact::Plain(_) => ArtifactKind::Plain,
            Artifact::Calibrated(_) => ArtifactKind::Calibrated,
            Artifact::Ensemble(_) => ArtifactKind::Ensemble,
        }
    }

    /// Number of input features the weights are bound to.
    pub fn n_features(&self) -> usize {
        match self {
            Artifact::Plain(p) => p.n_features(),
            Artifact::Calibrated(c) => c.n_features(),
            Artifact::Ensemble(e) => e.n_features(),
        }
    }

    /// Positive-class probability for one row, in the artifact's column order.
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        match self {
            Artifact::Plain(p) => p.predict_proba(row),
            Artifact::Calibrated(c) => c.predict_proba(row),
            Artifact::Ensemble(e) => e.predict_proba(row),
        }
    }

    /// Raw margin of the single linear boundary, if there is one.
    pub fn decision_function(&self, row: &[f64]) -> Option<f64> {
        match self {
            Artifact::Plain(p) => Some(p.decision_function(row)),
            Artifact::Calibrated(c) => Some(c.decision_function(row)),
            Artifact::Ensemble(_) => None,
        }
    }
}

impl From<Pipeline> for Artifact {
    fn from(p: Pipeline) -> Self {
        Artifact::Plain(p)
    }
}

impl From<CalibratedModel> for Artifact {
    fn from(c: CalibratedModel) -> Self {
        Artifact::Calibrated(c)
    }
}

impl From<CalibratedEnsemble> for Artifact {
    fn from(e: CalibratedEnsemble) -> Self {
        Artifact::Ensemble(e)
    }
}
