//! Artifact persistence.
//!
//! Artifacts are stored as a versioned JSON envelope:
//!
//! ```text
//! {
//!   "format": "placement-artifact",
//!   "version": 1,
//!   "meta": { "feature_names": [...], "target": "placed", ... },
//!   "model": { "type": "plain" | "calibrated" | "ensemble", ... }
//! }
//! ```
//!
//! Reading checks the header before decoding the payload, so a file from
//! an unknown format or a newer version fails with a specific error rather
//! than a generic JSON one.
//!
//! # Example
//!
//! ```
//! use placement::persist;
//! use placement::testing::scenario_artifact;
//! use placement::repr::ModelMeta;
//!
//! let artifact = scenario_artifact();
//! let json = persist::to_json_string(&artifact, &ModelMeta::canonical()).unwrap();
//! let (restored, meta) = persist::from_json_str(&json).unwrap();
//! assert_eq!(restored, artifact);
//! assert!(meta.is_canonical());
//! ```

mod convert;
mod error;
pub mod schema;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde_json::Value;

pub use error::{ReadError, WriteError};
pub use schema::{CURRENT_VERSION, FORMAT};

use crate::repr::{Artifact, ModelMeta};
use schema::{ArtifactEnvelope, ModelSchema};

/// Read an artifact and its metadata from a JSON file.
pub fn load_json(path: impl AsRef<Path>) -> Result<(Artifact, ModelMeta), ReadError> {
    let file = File::open(path.as_ref())?;
    from_reader(BufReader::new(file))
}

/// Read an artifact from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<(Artifact, ModelMeta), ReadError> {
    let value: Value = serde_json::from_reader(reader)?;
    from_value(value)
}

/// Read an artifact from a JSON string.
pub fn from_json_str(json: &str) -> Result<(Artifact, ModelMeta), ReadError> {
    let value: Value = serde_json::from_str(json)?;
    from_value(value)
}

fn from_value(value: Value) -> Result<(Artifact, ModelMeta), ReadError> {
    check_header(&value)?;

    let envelope: ArtifactEnvelope = serde_json::from_value(value)?;
    let artifact = Artifact::try_from(envelope.model)?;
    let meta = envelope.meta;

    if meta.feature_names.len() != artifact.n_features() {
        return Err(ReadError::Validation(format!(
            "meta lists {} feature names but the model has {} weights",
            meta.feature_names.len(),
            artifact.n_features()
        )));
    }
    Ok((artifact, meta))
}

fn check_header(value: &Value) -> Result<(), ReadError> {
    let format = value.get("format").and_then(Value::as_str);
    if format != Some(FORMAT) {
        return Err(ReadError::UnknownFormat(format.map(str::to_string)));
    }

    let version = value
        .get("version")
        .and_then(Value::as_u64)
        .ok_or_else(|| ReadError::Validation("missing or non-integer `version`".into()))?;
    if version != u64::from(CURRENT_VERSION) {
        return Err(ReadError::UnsupportedVersion {
            found: version,
            supported: CURRENT_VERSION,
        });
    }

    let ty = value
        .get("model")
        .and_then(|m| m.get("type"))
        .and_then(Value::as_str)
        .ok_or_else(|| ReadError::Validation("missing `model.type`".into()))?;
    if !ModelSchema::TYPES.contains(&ty) {
        return Err(ReadError::UnknownModelType(ty.to_string()));
    }
    Ok(())
}

/// Write an artifact and its metadata as pretty-printed JSON.
pub fn save_json(
    path: impl AsRef<Path>,
    artifact: &Artifact,
    meta: &ModelMeta,
) -> Result<(), WriteError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    to_writer(&mut writer, artifact, meta)?;
    writer.flush()?;
    Ok(())
}

/// Write an artifact to any writer.
pub fn to_writer<W: Write>(
    writer: W,
    artifact: &Artifact,
    meta: &ModelMeta,
) -> Result<(), WriteError> {
    let envelope = envelope(artifact, meta)?;
    serde_json::to_writer_pretty(writer, &envelope)?;
    Ok(())
}

/// Encode an artifact as a JSON string.
pub fn to_json_string(artifact: &Artifact, meta: &ModelMeta) -> Result<String, WriteError> {
    Ok(serde_json::to_string_pretty(&envelope(artifact, meta)?)?)
}

fn envelope(artifact: &Artifact, meta: &ModelMeta) -> Result<ArtifactEnvelope, WriteError> {
    if meta.feature_names.len() != artifact.n_features() {
        return Err(WriteError::Inconsistent(format!(
            "meta lists {} feature names but the model has {} weights",
            meta.feature_names.len(),
            artifact.n_features()
        )));
    }
    Ok(ArtifactEnvelope::new(meta.clone(), artifact.into()))
}
