//! Per-feature standardisation.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Learned `(x - mean) / scale` transform, one entry per feature.
///
/// # Example
///
/// ```
/// use placement::repr::StandardScaler;
/// use ndarray::array;
///
/// let scaler = StandardScaler::new(array![2.0, 10.0], array![0.5, 5.0]);
/// let z = scaler.transform(array![3.0, 0.0].view());
/// assert_eq!(z, array![2.0, -2.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Create a scaler from learned means and scales.
    ///
    /// # Panics
    ///
    /// Panics if lengths differ or a scale is zero.
    pub fn new(mean: Array1<f64>, scale: Array1<f64>) -> Self {
        assert_eq!(
            mean.len(),
            scale.len(),
            "mean length {} doesn't match scale length {}",
            mean.len(),
            scale.len()
        );
        assert!(scale.iter().all(|&s| s != 0.0), "scale entries must be non-zero");
        Self { mean, scale }
    }

    /// Scaler that leaves values unchanged.
    pub fn identity(n_features: usize) -> Self {
        Self {
            mean: Array1::zeros(n_features),
            scale: Array1::ones(n_features),
        }
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn mean(&self) -> ArrayView1<'_, f64> {
        self.mean.view()
    }

    pub fn scale(&self) -> ArrayView1<'_, f64> {
        self.scale.view()
    }

    /// Standardise one value of one feature.
    #[inline]
    pub fn transform_value(&self, feature: usize, x: f64) -> f64 {
        (x - self.mean[feature]) / self.scale[feature]
    }

    /// Standardise one row.
    pub fn transform(&self, row: ArrayView1<'_, f64>) -> Array1<f64> {
        debug_assert_eq!(row.len(), self.n_features());
        (&row - &self.mean) / &self.scale
    }

    /// Standardise a sample-major matrix `[n_samples, n_features]`.
    pub fn transform_rows(&self, rows: ArrayView2<'_, f64>) -> Array2<f64> {
        debug_assert_eq!(rows.ncols(), self.n_features());
        let mut out = rows.to_owned();
        for mut row in out.axis_iter_mut(Axis(0)) {
            row -= &self.mean;
            row /= &self.scale;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn identity_is_noop() {
        let scaler = StandardScaler::identity(3);
        let row = array![1.5, -2.0, 80.0];
        assert_eq!(scaler.transform(row.view()), row);
    }

    #[test]
    fn transform_rows_matches_rowwise() {
        let scaler = StandardScaler::new(array![1.0, 2.0], array![2.0, 4.0]);
        let rows = array![[3.0, 6.0], [1.0, 2.0], [-1.0, 0.0]];
        let out = scaler.transform_rows(rows.view());
        assert_eq!(out, array![[1.0, 1.0], [0.0, 0.0], [-1.0, -0.5]]);
        for (i, row) in rows.outer_iter().enumerate() {
            assert_eq!(scaler.transform(row), out.row(i));
        }
    }

    #[test]
    fn transform_value_single_feature() {
        let scaler = StandardScaler::new(array![1.0, 2.0], array![2.0, 4.0]);
        assert_eq!(scaler.transform_value(1, 10.0), 2.0);
    }

    #[test]
    #[should_panic(expected = "doesn't match")]
    fn length_mismatch_panics() {
        StandardScaler::new(array![0.0, 0.0], array![1.0]);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn zero_scale_panics() {
        StandardScaler::new(array![0.0], array![0.0]);
    }
}
