//! Explaining placement predictions.
//!
//! Two views of the same linear boundary:
//!
//! - [`rank_influences`]: global feature priority, the classifier's
//!   coefficients sorted by magnitude
//! - [`LinearExplainer`]: per-sample contributions that sum to the margin
//!
//! Both need a single weight vector. Plain and calibrated artifacts have one;
//! an ensemble of per-fold pipelines does not, and yields
//! [`ExplainError::UnsupportedArtifact`]. Prediction on such an artifact is
//! unaffected.

mod linear_explainer;
mod ranking;

use thiserror::Error;

use crate::repr::{Artifact, ArtifactKind, LinearModel, Pipeline};

pub use linear_explainer::{Contributions, LinearExplainer};
pub use ranking::{rank_columns, rank_influences, FeatureInfluence, RankingPolicy};

/// Errors raised while explaining a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplainError {
    /// The artifact has no single weight vector.
    #[error("{kind} artifacts have no single weight vector to explain")]
    UnsupportedArtifact { kind: ArtifactKind },

    /// The artifact's columns can't be mapped onto the profile features.
    #[error("artifact has {got} columns but {expected} named features were supplied")]
    ColumnMismatch { expected: usize, got: usize },

    /// Artifact column names that are not profile features.
    #[error("artifact columns {0:?} are not profile features")]
    UnmappedColumns(Vec<String>),
}

/// The single scaler + classifier pipeline behind an artifact.
pub fn linear_pipeline(artifact: &Artifact) -> Result<&Pipeline, ExplainError> {
    match artifact {
        Artifact::Plain(p) => Ok(p),
        Artifact::Calibrated(c) => Ok(c.pipeline()),
        Artifact::Ensemble(_) => Err(ExplainError::UnsupportedArtifact {
            kind: artifact.kind(),
        }),
    }
}

/// The classifier weights behind an artifact, in scaled feature space.
pub fn weights(artifact: &Artifact) -> Result<&LinearModel, ExplainError> {
    linear_pipeline(artifact).map(Pipeline::classifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::{CalibratedEnsemble, CalibratedModel, SigmoidCalibrator, StandardScaler};

    fn pipeline() -> Pipeline {
        Pipeline::new(StandardScaler::identity(2), LinearModel::from_parts(&[1.0, -2.0], 0.5))
    }

    #[test]
    fn calibrated_unwraps_inner_pipeline() {
        let cal = Artifact::Calibrated(CalibratedModel::new(
            pipeline(),
            SigmoidCalibrator::new(-3.0, 1.0),
        ));
        assert_eq!(weights(&cal).unwrap(), pipeline().classifier());
    }

    #[test]
    fn ensemble_is_unsupported() {
        let ens = Artifact::Ensemble(CalibratedEnsemble::new(vec![CalibratedModel::new(
            pipeline(),
            SigmoidCalibrator::passthrough(),
        )]));
        assert_eq!(
            weights(&ens).unwrap_err(),
            ExplainError::UnsupportedArtifact {
                kind: ArtifactKind::Ensemble
            }
        );
    }
}
