//! Labelled training data.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use super::error::DatasetError;
use crate::features::{Feature, FeatureVector, N_FEATURES};

/// Profile rows with binary placement labels.
///
/// Features are sample-major `[n_samples, 6]` in canonical column order;
/// labels are `0.0` or `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Array2<f64>,
    labels: Array1<f64>,
}

impl Dataset {
    pub fn new(features: Array2<f64>, labels: Array1<f64>) -> Result<Self, DatasetError> {
        if features.ncols() != N_FEATURES {
            return Err(DatasetError::FeatureCount {
                expected: N_FEATURES,
                got: features.ncols(),
            });
        }
        if features.nrows() != labels.len() {
            return Err(DatasetError::RowCountMismatch {
                features: features.nrows(),
                labels: labels.len(),
            });
        }
        if labels.is_empty() {
            return Err(DatasetError::Empty);
        }
        if let Some((row, &value)) = labels
            .iter()
            .enumerate()
            .find(|&(_, &y)| y != 0.0 && y != 1.0)
        {
            return Err(DatasetError::InvalidLabel { row, value });
        }
        for (row, values) in features.axis_iter(Axis(0)).enumerate() {
            if let Some(col) = values.iter().position(|x| !x.is_finite()) {
                return Err(DatasetError::NonFinite {
                    row,
                    feature: Feature::ALL[col].name().to_string(),
                });
            }
        }
        Ok(Self { features, labels })
    }

    /// Build from profile rows and labels.
    pub fn from_vectors(rows: &[FeatureVector], labels: &[f64]) -> Result<Self, DatasetError> {
        let mut features = Array2::zeros((rows.len(), N_FEATURES));
        for (mut out, v) in features.axis_iter_mut(Axis(0)).zip(rows) {
            out.assign(&ArrayView1::from(&v.to_array()));
        }
        Self::new(features, Array1::from(labels.to_vec()))
    }

    #[inline]
    pub fn n_samples(&self) -> usize {
        self.labels.len()
    }

    pub fn n_positive(&self) -> usize {
        self.labels.iter().filter(|&&y| y == 1.0).count()
    }

    pub fn n_negative(&self) -> usize {
        self.n_samples() - self.n_positive()
    }

    /// Whether both classes are present.
    pub fn has_both_classes(&self) -> bool {
        let pos = self.n_positive();
        pos > 0 && pos < self.n_samples()
    }

    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    pub fn labels(&self) -> ArrayView1<'_, f64> {
        self.labels.view()
    }

    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.features.row(i)
    }

    pub fn vector(&self, i: usize) -> FeatureVector {
        let row = self.features.row(i);
        FeatureVector::from_array(std::array::from_fn(|j| row[j]))
    }

    /// Subset of rows, in the given order.
    ///
    /// # Panics
    ///
    /// Panics if `indices` is empty or out of range.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        assert!(!indices.is_empty(), "cannot select an empty subset");
        Dataset {
            features: self.features.select(Axis(0), indices),
            labels: self.labels.select(Axis(0), indices),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn rows() -> Vec<FeatureVector> {
        vec![
            FeatureVector::new(8.0, 80.0, 3.0, 1.0, 7.0, 0.0),
            FeatureVector::new(5.0, 60.0, 0.0, 0.0, 2.0, 1.0),
            FeatureVector::new(7.0, 90.0, 2.0, 2.0, 6.0, 0.0),
        ]
    }

    #[test]
    fn counts_and_rows() {
        let ds = Dataset::from_vectors(&rows(), &[1.0, 0.0, 1.0]).unwrap();
        assert_eq!(ds.n_samples(), 3);
        assert_eq!(ds.n_positive(), 2);
        assert_eq!(ds.n_negative(), 1);
        assert!(ds.has_both_classes());
        assert_eq!(ds.vector(1), rows()[1]);
        assert_eq!(ds.row(2)[1], 90.0);
    }

    #[test]
    fn select_reorders() {
        let ds = Dataset::from_vectors(&rows(), &[1.0, 0.0, 1.0]).unwrap();
        let sub = ds.select(&[2, 0]);
        assert_eq!(sub.n_samples(), 2);
        assert_eq!(sub.vector(0), rows()[2]);
        assert_eq!(sub.labels(), array![1.0, 1.0]);
    }

    #[test]
    fn rejects_bad_labels() {
        let err = Dataset::from_vectors(&rows(), &[1.0, 0.5, 1.0]).unwrap_err();
        assert_eq!(err, DatasetError::InvalidLabel { row: 1, value: 0.5 });
    }

    #[test]
    fn rejects_shape_problems() {
        let err = Dataset::new(Array2::zeros((2, 5)), array![0.0, 1.0]).unwrap_err();
        assert!(matches!(err, DatasetError::FeatureCount { expected: 6, got: 5 }));

        let err = Dataset::from_vectors(&rows(), &[1.0]).unwrap_err();
        assert!(matches!(err, DatasetError::RowCountMismatch { features: 3, labels: 1 }));

        assert_eq!(Dataset::from_vectors(&[], &[]).unwrap_err(), DatasetError::Empty);
    }

    #[test]
    fn rejects_non_finite() {
        let mut bad = rows();
        bad[2].skills = f64::INFINITY;
        let err = Dataset::from_vectors(&bad, &[1.0, 0.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            DatasetError::NonFinite {
                row: 2,
                feature: "skills".into()
            }
        );
    }
}
