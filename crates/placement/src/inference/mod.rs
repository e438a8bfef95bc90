//! Placement inference.
//!
//! [`PlacementModel`] owns an immutable trained artifact plus its metadata.
//! Load it once at startup and share it by reference (or `Arc`); every
//! prediction path is read-only.
//!
//! Input rows must match the artifact's recorded feature names. Arity or name
//! disagreement is a [`PredictError::ShapeMismatch`], never coerced.

mod service;

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::explainability::{
    rank_columns, Contributions, ExplainError, FeatureInfluence, LinearExplainer, RankingPolicy,
};
use crate::features::{Feature, FeatureError, FeatureVector, RawValue};
use crate::persist::{self, ReadError};
use crate::repr::{Artifact, ModelMeta};

pub use service::{Assessment, PlacementService};

/// Errors raised on the prediction path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// The input columns disagree with the artifact's feature names.
    #[error("input shape mismatch: artifact expects {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<String>,
        got: Vec<String>,
    },

    #[error(transparent)]
    Feature(#[from] FeatureError),
}

/// A loaded placement model.
///
/// # Example
///
/// ```
/// use placement::features::FeatureVector;
/// use placement::inference::PlacementModel;
/// use placement::repr::ModelMeta;
/// use placement::testing::scenario_artifact;
///
/// let model = PlacementModel::from_artifact(scenario_artifact(), ModelMeta::canonical()).unwrap();
/// let p = model.predict(&FeatureVector::new(8.0, 80.0, 3.0, 1.0, 7.0, 0.0)).unwrap();
/// assert!(p > 0.999);
/// ```
#[derive(Debug, Clone)]
pub struct PlacementModel {
    artifact: Artifact,
    meta: ModelMeta,
    /// Artifact columns resolved to features; `None` if a name is not one of
    /// the six features.
    columns: Option<Vec<Feature>>,
}

impl PlacementModel {
    /// Read an artifact file.
    ///
    /// Failure here is fatal to the caller: there is no fallback model.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        let path = path.as_ref();
        let (artifact, meta) = persist::load_json(path)?;
        let model = Self::from_artifact(artifact, meta)?;
        debug!(
            path = %path.display(),
            kind = %model.artifact.kind(),
            n_features = model.n_features(),
            "loaded placement artifact"
        );
        Ok(model)
    }

    /// Wrap an in-memory artifact.
    pub fn from_artifact(artifact: Artifact, meta: ModelMeta) -> Result<Self, ReadError> {
        if meta.feature_names.len() != artifact.n_features() {
            return Err(ReadError::Validation(format!(
                "meta lists {} feature names but the model has {} weights",
                meta.feature_names.len(),
                artifact.n_features()
            )));
        }
        let columns = resolve_columns(&meta.feature_names);
        Ok(Self {
            artifact,
            meta,
            columns,
        })
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.artifact.n_features()
    }

    /// Check that the artifact's columns are exactly the canonical order.
    pub fn check_schema(&self) -> Result<(), PredictError> {
        if self.meta.is_canonical() {
            Ok(())
        } else {
            Err(self.mismatch(Feature::names()))
        }
    }

    /// Positive-class probability for a profile row.
    pub fn predict(&self, vector: &FeatureVector) -> Result<f64, PredictError> {
        let row = self.row_for(vector)?;
        let p = self.artifact.predict_proba(&row);
        debug!(probability = p, "predicted");
        Ok(p)
    }

    /// Positive-class probability for a raw row already in the artifact's
    /// column order.
    pub fn predict_row(&self, row: &[f64]) -> Result<f64, PredictError> {
        if row.len() != self.n_features() {
            return Err(self.mismatch(
                (0..row.len()).map(|i| format!("column {i}")).collect(),
            ));
        }
        Ok(self.artifact.predict_proba(row))
    }

    /// Positive-class probability for `(name, value)` pairs in any order.
    ///
    /// The supplied names must be exactly the artifact's names.
    pub fn predict_named<I, K, V>(&self, pairs: I) -> Result<f64, PredictError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<RawValue>,
    {
        let pairs: Vec<(String, RawValue)> = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.into()))
            .collect();

        let names_match = pairs.len() == self.meta.feature_names.len()
            && self
                .meta
                .feature_names
                .iter()
                .all(|name| pairs.iter().filter(|(k, _)| k == name).count() == 1);
        if !names_match {
            return Err(self.mismatch(pairs.into_iter().map(|(k, _)| k).collect()));
        }

        let mut row = Vec::with_capacity(pairs.len());
        for name in &self.meta.feature_names {
            // Presence checked above.
            if let Some((_, value)) = pairs.iter().find(|(k, _)| k == name) {
                row.push(value.to_f64(name)?);
            }
        }
        Ok(self.artifact.predict_proba(&row))
    }

    /// Raw margin for a profile row, or `None` for ensemble artifacts.
    pub fn decision_function(&self, vector: &FeatureVector) -> Result<Option<f64>, PredictError> {
        let row = self.row_for(vector)?;
        Ok(self.artifact.decision_function(&row))
    }

    /// Coefficients ranked by magnitude, mapped through the artifact's
    /// column names.
    pub fn influences(
        &self,
        policy: &RankingPolicy,
    ) -> Result<Vec<FeatureInfluence>, ExplainError> {
        rank_columns(&self.artifact, self.explain_columns()?, policy)
    }

    /// Per-feature contributions to this row's margin.
    pub fn contributions(&self, vector: &FeatureVector) -> Result<Contributions, ExplainError> {
        let explainer = LinearExplainer::with_columns(&self.artifact, self.explain_columns()?)?;
        Ok(explainer.contributions(vector))
    }

    fn explain_columns(&self) -> Result<&[Feature], ExplainError> {
        self.columns
            .as_deref()
            .ok_or_else(|| ExplainError::UnmappedColumns(self.meta.feature_names.clone()))
    }

    /// The row in artifact column order.
    fn row_for(&self, vector: &FeatureVector) -> Result<Vec<f64>, PredictError> {
        match &self.columns {
            Some(columns) => Ok(columns.iter().map(|&f| vector.get(f)).collect()),
            None => Err(self.mismatch(Feature::names())),
        }
    }

    fn mismatch(&self, got: Vec<String>) -> PredictError {
        PredictError::ShapeMismatch {
            expected: self.meta.feature_names.clone(),
            got,
        }
    }
}

/// Map each name to a feature; `None` on unknown or repeated names, or if
/// the names don't cover all six features.
fn resolve_columns(names: &[String]) -> Option<Vec<Feature>> {
    let columns = names
        .iter()
        .map(|n| Feature::from_name(n))
        .collect::<Option<Vec<_>>>()?;
    let covers_all = columns.len() == Feature::ALL.len()
        && Feature::ALL.iter().all(|f| columns.contains(f));
    covers_all.then_some(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::{LinearModel, Pipeline, StandardScaler};
    use crate::testing::scenario_artifact;
    use approx::assert_abs_diff_eq;

    fn scenario() -> PlacementModel {
        PlacementModel::from_artifact(scenario_artifact(), ModelMeta::canonical()).unwrap()
    }

    fn student() -> FeatureVector {
        FeatureVector::new(8.0, 80.0, 3.0, 1.0, 7.0, 0.0)
    }

    #[test]
    fn scenario_margin() {
        let margin = scenario().decision_function(&student()).unwrap().unwrap();
        assert_abs_diff_eq!(margin, 23.4, epsilon = 1e-9);
    }

    #[test]
    fn predict_matches_predict_row() {
        let model = scenario();
        let v = student();
        assert_eq!(model.predict(&v).unwrap(), model.predict_row(&v.to_array()).unwrap());
    }

    #[test]
    fn predict_row_checks_arity() {
        let err = scenario().predict_row(&[1.0, 2.0, 3.0]).unwrap_err();
        match err {
            PredictError::ShapeMismatch { expected, got } => {
                assert_eq!(expected.len(), 6);
                assert_eq!(got.len(), 3);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn predict_named_any_order() {
        let model = scenario();
        let p = model
            .predict_named([
                ("backlogs", 0.0),
                ("skills", 7.0),
                ("cgpa", 8.0),
                ("internships", 1.0),
                ("attendance", 80.0),
                ("projects", 3.0),
            ])
            .unwrap();
        assert_eq!(p, model.predict(&student()).unwrap());
    }

    #[test]
    fn predict_named_rejects_extra_or_missing() {
        let model = scenario();
        let missing = model.predict_named([("cgpa", 8.0)]);
        assert!(matches!(missing, Err(PredictError::ShapeMismatch { .. })));

        let mut pairs: Vec<(&str, f64)> = student().iter().map(|(f, x)| (f.name(), x)).collect();
        pairs.push(("gpa", 1.0));
        assert!(matches!(
            model.predict_named(pairs),
            Err(PredictError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn predict_named_rejects_text() {
        let model = scenario();
        let pairs: Vec<(&str, RawValue)> = student()
            .iter()
            .map(|(f, x)| {
                let v = if f == Feature::Cgpa { RawValue::from("8") } else { x.into() };
                (f.name(), v)
            })
            .collect();
        assert!(matches!(
            model.predict_named(pairs),
            Err(PredictError::Feature(FeatureError::NonNumeric { .. }))
        ));
    }

    #[test]
    fn permuted_artifact_columns_are_honoured() {
        // Same weights as the scenario, stored with cgpa and attendance swapped.
        let mut names = Feature::names();
        names.swap(0, 1);
        let artifact = Artifact::Plain(Pipeline::new(
            StandardScaler::identity(6),
            LinearModel::from_parts(&[0.1, 1.2, 0.4, 0.3, 0.9, -0.8], -2.0),
        ));
        let model =
            PlacementModel::from_artifact(artifact, ModelMeta::canonical().with_feature_names(names))
                .unwrap();

        assert!(model.check_schema().is_err());
        assert_eq!(model.predict(&student()).unwrap(), scenario().predict(&student()).unwrap());
    }

    #[test]
    fn unknown_artifact_columns_reject_vectors() {
        let names = vec!["a", "b", "c", "d", "e", "f"].into_iter().map(String::from).collect();
        let model =
            PlacementModel::from_artifact(scenario_artifact(), ModelMeta::canonical().with_feature_names(names))
                .unwrap();
        assert!(matches!(
            model.predict(&student()),
            Err(PredictError::ShapeMismatch { .. })
        ));
        assert!(model.predict_row(&student().to_array()).is_ok());
        assert!(matches!(
            model.influences(&RankingPolicy::all()),
            Err(ExplainError::UnmappedColumns(_))
        ));
    }

    #[test]
    fn influences_follow_column_names() {
        let mut names = Feature::names();
        names.swap(0, 1);
        let artifact = Artifact::Plain(Pipeline::new(
            StandardScaler::identity(6),
            LinearModel::from_parts(&[0.1, 1.2, 0.4, 0.3, 0.9, -0.8], -2.0),
        ));
        let model =
            PlacementModel::from_artifact(artifact, ModelMeta::canonical().with_feature_names(names))
                .unwrap();
        let ranked = model.influences(&RankingPolicy::all()).unwrap();
        assert_eq!(ranked[0].feature, Feature::Cgpa);
        assert_eq!(ranked[5].feature, Feature::Attendance);

        let c = model.contributions(&student()).unwrap();
        assert_abs_diff_eq!(c.total(), 23.4, epsilon = 1e-9);
    }

    #[test]
    fn meta_arity_is_checked() {
        let meta = ModelMeta::canonical().with_feature_names(vec!["cgpa".into()]);
        assert!(PlacementModel::from_artifact(scenario_artifact(), meta).is_err());
    }

    #[test]
    fn model_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PlacementModel>();
    }
}
