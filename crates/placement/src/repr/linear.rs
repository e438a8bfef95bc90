//! Linear decision boundary (coefficients + intercept).

use ndarray::{s, Array1, ArrayView1};

/// Binary logistic classifier weights.
///
/// Stores coefficients and intercept in a single `Array1<f64>` of length
/// `n_features + 1`:
///
/// ```text
/// weights[feature]    → coefficient
/// weights[n_features] → bias (last entry)
/// ```
///
/// The decision value is `coefficients · x + bias`, where `x` is already in
/// the scaled space the classifier was trained on.
///
/// # Example
///
/// ```
/// use placement::repr::LinearModel;
///
/// let model = LinearModel::from_parts(&[0.5, -0.25], 0.1);
/// assert_eq!(model.n_features(), 2);
/// assert_eq!(model.weight(1), -0.25);
/// assert_eq!(model.bias(), 0.1);
/// assert!((model.decision(&[2.0, 4.0]) - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    weights: Array1<f64>,
}

impl LinearModel {
    /// Create a model from a flat `[coefficients..., bias]` array.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty (the bias entry is required).
    pub fn new(weights: Array1<f64>) -> Self {
        assert!(!weights.is_empty(), "weights must have at least 1 entry (bias)");
        Self { weights }
    }

    /// Create a model from coefficients and a separate bias.
    pub fn from_parts(coefficients: &[f64], bias: f64) -> Self {
        let mut weights = Array1::zeros(coefficients.len() + 1);
        weights
            .slice_mut(s![..coefficients.len()])
            .assign(&ArrayView1::from(coefficients));
        weights[coefficients.len()] = bias;
        Self { weights }
    }

    /// Zero-initialised model.
    pub fn zeros(n_features: usize) -> Self {
        Self {
            weights: Array1::zeros(n_features + 1),
        }
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.weights.len() - 1
    }

    /// Coefficient for one feature.
    #[inline]
    pub fn weight(&self, feature: usize) -> f64 {
        self.weights[feature]
    }

    #[inline]
    pub fn bias(&self) -> f64 {
        self.weights[self.n_features()]
    }

    /// Coefficients, excluding the bias.
    #[inline]
    pub fn coefficients(&self) -> ArrayView1<'_, f64> {
        self.weights.slice(s![..self.n_features()])
    }

    /// Full `[coefficients..., bias]` view.
    #[inline]
    pub fn as_array(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    #[inline]
    pub fn set_weight(&mut self, feature: usize, value: f64) {
        self.weights[feature] = value;
    }

    #[inline]
    pub fn set_bias(&mut self, value: f64) {
        let n_features = self.n_features();
        self.weights[n_features] = value;
    }

    #[inline]
    pub fn add_weight(&mut self, feature: usize, delta: f64) {
        self.weights[feature] += delta;
    }

    #[inline]
    pub fn add_bias(&mut self, delta: f64) {
        let n_features = self.n_features();
        self.weights[n_features] += delta;
    }

    /// Raw decision value for one scaled row.
    ///
    /// Extra trailing values beyond `n_features` are ignored.
    #[inline]
    pub fn decision(&self, scaled: &[f64]) -> f64 {
        self.coefficients()
            .iter()
            .zip(scaled)
            .fold(self.bias(), |acc, (&w, &x)| acc + w * x)
    }
}
