//! Conversion between runtime types and schema types.
//!
//! Runtime → schema is infallible (`From`). Schema → runtime validates the
//! shape first (`TryFrom`), since the runtime constructors panic on
//! inconsistent input.

use ndarray::Array1;

use super::error::ReadError;
use super::schema::{
    CalibratedMemberSchema, CalibratorSchema, ClassifierSchema, ModelSchema, PipelineSchema,
    ScalerSchema,
};
use crate::repr::{
    Artifact, CalibratedEnsemble, CalibratedModel, LinearModel, Pipeline, SigmoidCalibrator,
    StandardScaler,
};

fn check_finite(what: &str, values: &[f64]) -> Result<(), ReadError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(ReadError::Validation(format!(
            "{what}[{i}] is not finite ({})",
            values[i]
        ))),
        None => Ok(()),
    }
}

// =============================================================================
// Pipeline
// =============================================================================

impl From<&Pipeline> for PipelineSchema {
    fn from(pipeline: &Pipeline) -> Self {
        let scaler = pipeline.scaler();
        let classifier = pipeline.classifier();
        Self {
            scaler: ScalerSchema {
                mean: scaler.mean().to_vec(),
                scale: scaler.scale().to_vec(),
            },
            classifier: ClassifierSchema {
                coefficients: classifier.coefficients().to_vec(),
                intercept: classifier.bias(),
            },
        }
    }
}

impl TryFrom<PipelineSchema> for Pipeline {
    type Error = ReadError;

    fn try_from(schema: PipelineSchema) -> Result<Self, Self::Error> {
        let PipelineSchema { scaler, classifier } = schema;
        let n = classifier.coefficients.len();

        if n == 0 {
            return Err(ReadError::Validation(
                "classifier has no coefficients".into(),
            ));
        }
        if scaler.mean.len() != n || scaler.scale.len() != n {
            return Err(ReadError::Validation(format!(
                "scaler has {} means and {} scales but classifier has {} coefficients",
                scaler.mean.len(),
                scaler.scale.len(),
                n
            )));
        }
        check_finite("scaler.mean", &scaler.mean)?;
        check_finite("scaler.scale", &scaler.scale)?;
        check_finite("classifier.coefficients", &classifier.coefficients)?;
        check_finite("classifier.intercept", &[classifier.intercept])?;
        if let Some(i) = scaler.scale.iter().position(|&s| s == 0.0) {
            return Err(ReadError::Validation(format!("scaler.scale[{i}] is zero")));
        }

        let scaler = StandardScaler::new(Array1::from(scaler.mean), Array1::from(scaler.scale));
        let classifier = LinearModel::from_parts(&classifier.coefficients, classifier.intercept);
        Ok(Pipeline::new(scaler, classifier))
    }
}

// =============================================================================
// Calibrator
// =============================================================================

impl From<&SigmoidCalibrator> for CalibratorSchema {
    fn from(c: &SigmoidCalibrator) -> Self {
        Self { a: c.a, b: c.b }
    }
}

impl TryFrom<CalibratorSchema> for SigmoidCalibrator {
    type Error = ReadError;

    fn try_from(schema: CalibratorSchema) -> Result<Self, Self::Error> {
        check_finite("calibrator", &[schema.a, schema.b])?;
        Ok(SigmoidCalibrator::new(schema.a, schema.b))
    }
}

impl From<&CalibratedModel> for CalibratedMemberSchema {
    fn from(m: &CalibratedModel) -> Self {
        Self {
            pipeline: m.pipeline().into(),
            calibrator: m.calibrator().into(),
        }
    }
}

impl TryFrom<CalibratedMemberSchema> for CalibratedModel {
    type Error = ReadError;

    fn try_from(schema: CalibratedMemberSchema) -> Result<Self, Self::Error> {
        Ok(CalibratedModel::new(
            schema.pipeline.try_into()?,
            schema.calibrator.try_into()?,
        ))
    }
}

// =============================================================================
// Artifact
// =============================================================================

impl From<&Artifact> for ModelSchema {
    fn from(artifact: &Artifact) -> Self {
        match artifact {
            Artifact::Plain(p) => ModelSchema::Plain { pipeline: p.into() },
            Artifact::Calibrated(c) => ModelSchema::Calibrated {
                pipeline: c.pipeline().into(),
                calibrator: c.calibrator().into(),
            },
            Artifact::Ensemble(e) => ModelSchema::Ensemble {
                members: e.members().iter().map(Into::into).collect(),
            },
        }
    }
}

impl TryFrom<ModelSchema> for Artifact {
    type Error = ReadError;

    fn try_from(schema: ModelSchema) -> Result<Self, Self::Error> {
        Ok(match schema {
            ModelSchema::Plain { pipeline } => Artifact::Plain(pipeline.try_into()?),
            ModelSchema::Calibrated { pipeline, calibrator } => Artifact::Calibrated(
                CalibratedModel::new(pipeline.try_into()?, calibrator.try_into()?),
            ),
            ModelSchema::Ensemble { members } => {
                if members.is_empty() {
                    return Err(ReadError::Validation("ensemble has no members".into()));
                }
                let members = members
                    .into_iter()
                    .map(CalibratedModel::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                let n_features = members[0].n_features();
                if let Some(i) = members.iter().position(|m| m.n_features() != n_features) {
                    return Err(ReadError::Validation(format!(
                        "ensemble member {i} has {} features, member 0 has {n_features}",
                        members[i].n_features()
                    )));
                }
                Artifact::Ensemble(CalibratedEnsemble::new(members))
            }
        })
    }
}
