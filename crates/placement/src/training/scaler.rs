//! Fitting the standardisation step.

use ndarray::{Array1, ArrayView2, Axis};

use crate::repr::StandardScaler;

/// Column means and population standard deviations of `[n_samples, n_features]`.
///
/// A constant column gets scale 1.0 so it passes through centred but
/// unscaled.
///
/// # Panics
///
/// Panics if `features` has no rows.
pub fn fit_scaler(features: ArrayView2<'_, f64>) -> StandardScaler {
    assert!(features.nrows() > 0, "cannot fit a scaler on zero rows");
    let mean = features.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(features.ncols()));
    let scale = features
        .std_axis(Axis(0), 0.0)
        .mapv(|s| if s > 0.0 && s.is_finite() { s } else { 1.0 });
    StandardScaler::new(mean, scale)
}
