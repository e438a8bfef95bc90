//! Serialized shapes of the artifact envelope.
//!
//! Kept separate from the runtime types in [`crate::repr`] so the file
//! format can evolve without touching the forward pass. Conversions live in
//! [`super::convert`].

use serde::{Deserialize, Serialize};

use crate::repr::ModelMeta;

/// Value of the envelope's `format` field.
pub const FORMAT: &str = "placement-artifact";

/// Envelope version written by this build.
pub const CURRENT_VERSION: u32 = 1;

/// Top-level JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEnvelope {
    pub format: String,
    pub version: u32,
    pub meta: ModelMeta,
    pub model: ModelSchema,
}

impl ArtifactEnvelope {
    pub fn new(meta: ModelMeta, model: ModelSchema) -> Self {
        Self {
            format: FORMAT.to_string(),
            version: CURRENT_VERSION,
            meta,
            model,
        }
    }
}

/// Model payload, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSchema {
    Plain {
        pipeline: PipelineSchema,
    },
    Calibrated {
        pipeline: PipelineSchema,
        calibrator: CalibratorSchema,
    },
    Ensemble {
        members: Vec<CalibratedMemberSchema>,
    },
}

impl ModelSchema {
    /// Values accepted in the `type` tag.
    pub const TYPES: [&'static str; 3] = ["plain", "calibrated", "ensemble"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerSchema {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSchema {
    /// One coefficient per feature, in `meta.feature_names` order.
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSchema {
    pub scaler: ScalerSchema,
    pub classifier: ClassifierSchema,
}

/// `p = 1 / (1 + exp(a·f + b))`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CalibratorSchema {
    pub a: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibratedMemberSchema {
    pub pipeline: PipelineSchema,
    pub calibrator: CalibratorSchema,
}
