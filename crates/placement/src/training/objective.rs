//! Binary logistic loss.

use crate::repr::transform::{logit, sigmoid, softplus};

/// Gradient and hessian of the loss at one sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GradHess {
    pub grad: f64,
    pub hess: f64,
}

/// Binary cross-entropy on raw margins.
///
/// - Loss: `softplus(m) - y·m`
/// - Gradient: `p - y`
/// - Hessian: `p · (1 - p)`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticLoss;

impl LogisticLoss {
    const HESS_MIN: f64 = 1e-16;

    #[inline]
    pub fn loss(margin: f64, label: f64) -> f64 {
        softplus(margin) - label * margin
    }

    pub fn compute_gradients(margins: &[f64], labels: &[f64], out: &mut [GradHess]) {
        debug_assert_eq!(margins.len(), labels.len());
        debug_assert_eq!(margins.len(), out.len());
        for ((gh, &m), &y) in out.iter_mut().zip(margins).zip(labels) {
            let p = sigmoid(m);
            gh.grad = p - y;
            gh.hess = (p * (1.0 - p)).max(Self::HESS_MIN);
        }
    }

    /// Log-odds of the positive rate, the optimal constant margin.
    pub fn base_score(labels: &[f64]) -> f64 {
        if labels.is_empty() {
            return 0.0;
        }
        let rate = labels.iter().sum::<f64>() / labels.len() as f64;
        logit(rate)
    }
}
