//! Labelled training data and its loaders.

mod dataset;
mod error;
mod io;

pub use dataset::Dataset;
pub use error::{DatasetError, DatasetLoadError};
pub use io::{load_csv, read_csv};
