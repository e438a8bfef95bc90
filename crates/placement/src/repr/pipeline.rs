//! Scaler + linear classifier pipeline.

use super::transform::sigmoid;
use super::{LinearModel, StandardScaler};

/// `StandardScaler → LogisticRegression`.
///
/// Rows are given in raw feature units; the pipeline standardises them before
/// applying the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    scaler: StandardScaler,
    classifier: LinearModel,
}

impl Pipeline {
    /// # Panics
    ///
    /// Panics if the scaler and classifier disagree on feature count.
    pub fn new(scaler: StandardScaler, classifier: LinearModel) -> Self {
        assert_eq!(
            scaler.n_features(),
            classifier.n_features(),
            "scaler has {} features but classifier has {}",
            scaler.n_features(),
            classifier.n_features()
        );
        Self { scaler, classifier }
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.classifier.n_features()
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn classifier(&self) -> &LinearModel {
        &self.classifier
    }

    /// Raw margin for one row in raw units.
    pub fn decision_function(&self, row: &[f64]) -> f64 {
        debug_assert_eq!(row.len(), self.n_features());
        let scaled: Vec<f64> = row
            .iter()
            .enumerate()
            .map(|(feature, &x)| self.scaler.transform_value(feature, x))
            .collect();
        self.classifier.decision(&scaled)
    }

    /// Positive-class probability for one row in raw units.
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        sigmoid(self.decision_function(row))
    }
}
