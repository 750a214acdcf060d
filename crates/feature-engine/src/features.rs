//! Encoded Frames and Feature Vectors

use crate::error::FeatureError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use std::collections::HashMap;

/// Name of the numeric passthrough column
pub const YEAR_MODEL_COLUMN: &str = "year_model";

/// Encoded rows together with the names of their columns
///
/// The column set depends on the rows that were encoded, so two frames
/// built from different inputs are not comparable until aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFrame {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    values: Array2<f64>,
}

impl EncodedFrame {
    /// Create a frame, checking that names are unique and match the matrix width
    pub fn new(columns: Vec<String>, values: Array2<f64>) -> Result<Self, FeatureError> {
        if columns.len() != values.ncols() {
            return Err(FeatureError::ShapeMismatch {
                expected: columns.len(),
                actual: values.ncols(),
            });
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(FeatureError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self {
            columns,
            index,
            values,
        })
    }

    /// Column names in matrix order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column, if the frame has it
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.values.row(i)
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Copy of the frame restricted to the given rows, in that order
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            index: self.index.clone(),
            values: self.values.select(Axis(0), rows),
        }
    }
}

/// Numeric vector laid out in the frozen training column order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Array1<f64>,
}

impl FeatureVector {
    pub(crate) fn new(values: Array1<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.to_vec()
    }
}
