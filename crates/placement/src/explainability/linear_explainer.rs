//! Per-sample contributions for a scaler + linear pipeline.
//!
//! In scaled space the classifier is linear, and the training data has zero
//! mean there, so contributions have a closed form:
//! `c[i] = w[i] * (x[i] - mean[i]) / scale[i]`, with the bias as base value.
//! Their sum plus the base value is the margin.

use super::{linear_pipeline, ExplainError};
use crate::features::{Feature, FeatureVector, N_FEATURES};
use crate::repr::{Artifact, Pipeline};

/// Contributions for one profile row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contributions {
    /// Margin of the training-mean student.
    pub base_value: f64,
    /// Indexed by [`Feature::index`].
    pub values: [f64; N_FEATURES],
}

impl Contributions {
    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }

    /// `base_value + Σ values`, equal to the row's margin.
    pub fn total(&self) -> f64 {
        self.base_value + self.values.iter().sum::<f64>()
    }

    /// Features sorted by absolute contribution, descending; ties keep
    /// canonical order.
    pub fn ranked(&self) -> Vec<(Feature, f64)> {
        let mut out: Vec<(Feature, f64)> =
            Feature::ALL.iter().map(|&f| (f, self.get(f))).collect();
        out.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        out
    }
}

/// Closed-form explainer over one pipeline.
#[derive(Debug, Clone)]
pub struct LinearExplainer<'a> {
    pipeline: &'a Pipeline,
    columns: Vec<Feature>,
}

impl<'a> LinearExplainer<'a> {
    /// Explainer for an artifact in canonical column order.
    pub fn new(artifact: &'a Artifact) -> Result<Self, ExplainError> {
        Self::with_columns(artifact, &Feature::ALL)
    }

    /// Explainer with `columns[i]` naming column `i`.
    pub fn with_columns(artifact: &'a Artifact, columns: &[Feature]) -> Result<Self, ExplainError> {
        let pipeline = linear_pipeline(artifact)?;
        if pipeline.n_features() != columns.len() {
            return Err(ExplainError::ColumnMismatch {
                expected: columns.len(),
                got: pipeline.n_features(),
            });
        }
        Ok(Self {
            pipeline,
            columns: columns.to_vec(),
        })
    }

    pub fn base_value(&self) -> f64 {
        self.pipeline.classifier().bias()
    }

    pub fn contributions(&self, vector: &FeatureVector) -> Contributions {
        let scaler = self.pipeline.scaler();
        let classifier = self.pipeline.classifier();

        let mut values = [0.0; N_FEATURES];
        for (i, &feature) in self.columns.iter().enumerate() {
            let z = scaler.transform_value(i, vector.get(feature));
            values[feature.index()] += classifier.weight(i) * z;
        }
        Contributions {
            base_value: self.base_value(),
            values,
        }
    }
}
