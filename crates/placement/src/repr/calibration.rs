//! Sigmoid (Platt) probability calibration.

use super::Pipeline;
use super::transform::sigmoid;

/// Monotonic map from a raw margin `f` to a calibrated probability:
/// `p = 1 / (1 + exp(a·f + b))`.
///
/// A well-fitted calibrator on a sensible classifier has `a < 0`, so larger
/// margins give larger probabilities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmoidCalibrator {
    pub a: f64,
    pub b: f64,
}

impl SigmoidCalibrator {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Calibrator that reproduces the plain logistic output (`a = -1, b = 0`).
    pub fn passthrough() -> Self {
        Self { a: -1.0, b: 0.0 }
    }

    #[inline]
    pub fn predict(&self, margin: f64) -> f64 {
        sigmoid(-(self.a * margin + self.b))
    }
}

/// A pipeline fitted on all training rows plus one calibrator fitted on
/// cross-validated held-out margins.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibratedModel {
    pipeline: Pipeline,
    calibrator: SigmoidCalibrator,
}

impl CalibratedModel {
    pub fn new(pipeline: Pipeline, calibrator: SigmoidCalibrator) -> Self {
        Self { pipeline, calibrator }
    }

    /// The wrapped pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn calibrator(&self) -> &SigmoidCalibrator {
        &self.calibrator
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.pipeline.n_features()
    }

    pub fn decision_function(&self, row: &[f64]) -> f64 {
        self.pipeline.decision_function(row)
    }

    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        self.calibrator.predict(self.pipeline.decision_function(row))
    }
}

/// One calibrated pipeline per cross-validation fold; probabilities are
/// averaged across members.
///
/// Members carry different weights, so the ensemble has no single linear
/// boundary to explain.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibratedEnsemble {
    members: Vec<CalibratedModel>,
}

impl CalibratedEnsemble {
    /// # Panics
    ///
    /// Panics if `members` is empty or members disagree on feature count.
    pub fn new(members: Vec<CalibratedModel>) -> Self {
        assert!(!members.is_empty(), "ensemble needs at least one member");
        let n_features = members[0].n_features();
        assert!(
            members.iter().all(|m| m.n_features() == n_features),
            "ensemble members disagree on feature count"
        );
        Self { members }
    }

    pub fn members(&self) -> &[CalibratedModel] {
        &self.members
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.members[0].n_features()
    }

    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        let sum: f64 = self.members.iter().map(|m| m.predict_proba(row)).sum();
        sum / self.members.len() as f64
    }
}
