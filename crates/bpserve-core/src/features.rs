//! Conversion of caller-supplied features into a numeric matrix.
//!
//! Models always receive a batch: a single sample (`[1.0, 2.0, 3.0]`) is
//! reshaped into one row, a list of samples is passed through as rows.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2};
use serde_json::Value;

/// A batch of samples, one row per sample
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    data: Array2<f64>,
}

impl FeatureMatrix {
    /// Convert a JSON features value into a matrix.
    ///
    /// A flat array of numbers becomes a single row. An array of equally
    /// long arrays of numbers becomes one row per inner array. Anything else
    /// is rejected.
    pub fn from_json(value: &Value) -> Result<Self> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(Error::features(format!(
                    "expected an array of numbers or an array of rows, got {}",
                    json_kind(other)
                )))
            }
        };

        if items.is_empty() {
            return Err(Error::features("features array is empty"));
        }

        if items.iter().all(Value::is_array) {
            Self::from_rows(items)
        } else {
            let row = numeric_row(items, 0)?;
            Self::from_shape(1, row.len(), row)
        }
    }

    fn from_rows(rows: &[Value]) -> Result<Self> {
        let mut width = None;
        let mut flat = Vec::new();

        for (i, row) in rows.iter().enumerate() {
            let values = match row {
                Value::Array(values) => values,
                other => {
                    return Err(Error::features(format!(
                        "row {i} is {}, expected an array of numbers",
                        json_kind(other)
                    )))
                }
            };
            let row = numeric_row(values, i)?;
            match width {
                None => width = Some(row.len()),
                Some(expected) if expected != row.len() => {
                    return Err(Error::features(format!(
                        "inhomogeneous rows: row {i} has {} values, expected {expected}",
                        row.len()
                    )))
                }
                Some(_) => {}
            }
            flat.extend(row);
        }

        Self::from_shape(rows.len(), width.unwrap_or(0), flat)
    }

    fn from_shape(rows: usize, cols: usize, flat: Vec<f64>) -> Result<Self> {
        if cols == 0 {
            return Err(Error::features("samples must contain at least one value"));
        }
        let data = Array2::from_shape_vec((rows, cols), flat)
            .map_err(|e| Error::features(format!("invalid feature shape: {e}")))?;
        Ok(Self { data })
    }

    /// Number of samples (rows)
    pub fn n_samples(&self) -> usize {
        self.data.nrows()
    }

    /// Number of features per sample (columns)
    pub fn n_features(&self) -> usize {
        self.data.ncols()
    }

    /// Borrow the underlying matrix
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }
}

fn numeric_row(values: &[Value], row: usize) -> Result<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(col, v)| {
            v.as_f64().ok_or_else(|| {
                Error::features(format!(
                    "could not convert {} at row {row}, column {col} to a number",
                    json_kind(v)
                ))
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
