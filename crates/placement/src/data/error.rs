//! Dataset error types.

use std::io;

use thiserror::Error;

/// A feature matrix and label vector that don't form a valid dataset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("dataset has no rows")]
    Empty,

    #[error("expected {expected} feature columns, got {got}")]
    FeatureCount { expected: usize, got: usize },

    #[error("{features} feature rows but {labels} labels")]
    RowCountMismatch { features: usize, labels: usize },

    #[error("label in row {row} is {value}, expected 0 or 1")]
    InvalidLabel { row: usize, value: f64 },

    #[error("feature `{feature}` in row {row} is not finite")]
    NonFinite { row: usize, feature: String },
}

/// Errors raised while loading a dataset file.
#[derive(Debug, Error)]
pub enum DatasetLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("schema validation failed: {0}")]
    Schema(String),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("unexpected column: {0}")]
    UnexpectedColumn(String),

    #[error("column `{0}` appears more than once")]
    DuplicateColumn(String),

    #[error("missing value in column `{column}`, row {row}")]
    MissingValue { column: String, row: usize },

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
