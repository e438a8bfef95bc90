//! CSV loading via the arrow CSV reader.
//!
//! The file must have a header naming exactly the six feature columns and
//! the `placed` label, in any order. Every column is read as `Float64`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, Float64Array};
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use ndarray::{Array1, Array2};
use tracing::debug;

use super::error::DatasetLoadError;
use super::Dataset;
use crate::features::{Feature, N_FEATURES};
use crate::repr::TARGET_COLUMN;

/// Load a labelled dataset from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Dataset, DatasetLoadError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = read_csv(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        n_samples = dataset.n_samples(),
        n_positive = dataset.n_positive(),
        "loaded training data"
    );
    Ok(dataset)
}

/// Read a labelled dataset from CSV text.
pub fn read_csv<R: BufRead>(mut reader: R) -> Result<Dataset, DatasetLoadError> {
    let mut header = String::new();
    reader.read_line(&mut header)?;
    let names = parse_header(&header)?;
    let layout = ColumnLayout::resolve(&names)?;

    let schema = Arc::new(Schema::new(
        names
            .iter()
            .map(|n| Field::new(n.as_str(), DataType::Float64, true))
            .collect::<Vec<_>>(),
    ));
    let csv = ReaderBuilder::new(schema).with_header(false).build(reader)?;

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
    for batch in csv {
        let batch = batch?;
        for (i, column) in columns.iter_mut().enumerate() {
            let array = batch
                .column(i)
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| DatasetLoadError::Schema(format!("column `{}` is not Float64", names[i])))?;
            let offset = column.len();
            for (row, value) in array.iter().enumerate() {
                let value = value.ok_or_else(|| DatasetLoadError::MissingValue {
                    column: names[i].clone(),
                    row: offset + row,
                })?;
                column.push(value);
            }
        }
    }

    let n_samples = columns.first().map_or(0, Vec::len);
    let mut features = Array2::zeros((n_samples, N_FEATURES));
    for feature in Feature::ALL {
        let source = &columns[layout.features[feature.index()]];
        for (row, &x) in source.iter().enumerate() {
            features[[row, feature.index()]] = x;
        }
    }
    let labels = Array1::from(std::mem::take(&mut columns[layout.target]));

    Ok(Dataset::new(features, labels)?)
}

fn parse_header(line: &str) -> Result<Vec<String>, DatasetLoadError> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start_matches('\u{feff}');
    if line.trim().is_empty() {
        return Err(DatasetLoadError::Schema("missing header row".into()));
    }
    Ok(line
        .split(',')
        .map(|name| name.trim().trim_matches('"').to_string())
        .collect())
}

/// Where each required column sits in the file.
struct ColumnLayout {
    features: [usize; N_FEATURES],
    target: usize,
}

impl ColumnLayout {
    fn resolve(names: &[String]) -> Result<Self, DatasetLoadError> {
        let mut features = [None; N_FEATURES];
        let mut target = None;

        for (i, name) in names.iter().enumerate() {
            let slot = if name == TARGET_COLUMN {
                &mut target
            } else if let Some(f) = Feature::from_name(name) {
                &mut features[f.index()]
            } else {
                return Err(DatasetLoadError::UnexpectedColumn(name.clone()));
            };
            if slot.replace(i).is_some() {
                return Err(DatasetLoadError::DuplicateColumn(name.clone()));
            }
        }

        let mut resolved = [0; N_FEATURES];
        for f in Feature::ALL {
            resolved[f.index()] = features[f.index()]
                .ok_or_else(|| DatasetLoadError::MissingColumn(f.name().to_string()))?;
        }
        Ok(Self {
            features: resolved,
            target: target.ok_or_else(|| DatasetLoadError::MissingColumn(TARGET_COLUMN.into()))?,
        })
    }
}
