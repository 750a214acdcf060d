//! Categorical One-Hot Encoder

use crate::error::FeatureError;
use crate::features::{EncodedFrame, YEAR_MODEL_COLUMN};
use data_validator::NormalizedAttributes;
use ndarray::Array2;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Categorical fields, in the order their indicator columns are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    Brand,
    Model,
    Fuel,
    Gear,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 4] = [
        CategoricalField::Brand,
        CategoricalField::Model,
        CategoricalField::Fuel,
        CategoricalField::Gear,
    ];

    /// Field name used as the column prefix
    pub fn name(&self) -> &'static str {
        match self {
            CategoricalField::Brand => "brand",
            CategoricalField::Model => "model",
            CategoricalField::Fuel => "fuel",
            CategoricalField::Gear => "gear",
        }
    }

    /// Normalized value of this field in a row
    pub fn value<'a>(&self, row: &'a NormalizedAttributes) -> &'a str {
        match self {
            CategoricalField::Brand => row.brand(),
            CategoricalField::Model => row.model(),
            CategoricalField::Fuel => row.fuel(),
            CategoricalField::Gear => row.gear(),
        }
    }

    /// Indicator column name, `{field}_{category}`
    pub fn column_name(&self, category: &str) -> String {
        format!("{}_{}", self.name(), category)
    }
}

/// One-hot encoder over the rows passed to a single call
///
/// Every distinct category yields its own indicator column (no reference
/// category is dropped). Column order is `year_model` first, then each
/// field in [`CategoricalField::ALL`] order with its categories sorted
/// lexicographically, so the same input always produces the same columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoricalEncoder;

impl CategoricalEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Column names the given rows encode to
    pub fn columns(&self, rows: &[NormalizedAttributes]) -> Vec<String> {
        let mut columns = vec![YEAR_MODEL_COLUMN.to_string()];
        for field in CategoricalField::ALL {
            let categories: BTreeSet<&str> = rows.iter().map(|r| field.value(r)).collect();
            columns.extend(categories.into_iter().map(|c| field.column_name(c)));
        }
        columns
    }

    /// Encode rows into a numeric frame with its own column names
    pub fn encode(&self, rows: &[NormalizedAttributes]) -> Result<EncodedFrame, FeatureError> {
        if rows.is_empty() {
            return Err(FeatureError::EmptyInput);
        }

        let columns = self.columns(rows);
        let values = {
            let index: HashMap<&str, usize> = columns
                .iter()
                .enumerate()
                .map(|(i, name)| (name.as_str(), i))
                .collect();
            let mut values = Array2::<f64>::zeros((rows.len(), columns.len()));

            for (i, row) in rows.iter().enumerate() {
                values[(i, 0)] = f64::from(row.year_model());
                for field in CategoricalField::ALL {
                    let name = field.column_name(field.value(row));
                    if let Some(&j) = index.get(name.as_str()) {
                        values[(i, j)] = 1.0;
                    }
                }
            }
            values
        };

        debug!("Encoded {} rows into {} columns", rows.len(), columns.len());

        EncodedFrame::new(columns, values)
    }
}
