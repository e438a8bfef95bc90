//! Persistence error types.

use thiserror::Error;

/// Errors raised while reading an artifact.
///
/// Any of these at startup means the service cannot serve predictions.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed artifact JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The envelope's `format` field is missing or names another format.
    #[error("not a placement artifact (format = {0:?})")]
    UnknownFormat(Option<String>),

    #[error("artifact version {found} is not supported (this build reads version {supported})")]
    UnsupportedVersion { found: u64, supported: u32 },

    #[error("unknown model type {0:?}")]
    UnknownModelType(String),

    /// The payload parsed but describes an impossible model.
    #[error("invalid artifact: {0}")]
    Validation(String),
}

/// Errors raised while writing an artifact.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot write artifact: {0}")]
    Inconsistent(String),
}
