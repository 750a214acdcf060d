//! Categorical Text Normalization
//!
//! Training and inference must run every categorical field through the same
//! [`normalize`] routine. [`NormalizedAttributes`] can only be built through
//! it, so the encoder never sees raw text.

use crate::record::{Record, VehicleAttributes};
use std::fmt::Display;

/// Normalize a categorical value: string form, trimmed, lowercased
///
/// Never fails. Non-string values are coerced through `Display`.
pub fn normalize(value: impl Display) -> String {
    value.to_string().trim().to_lowercase()
}

/// Vehicle attributes after normalization of the four categorical fields
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedAttributes {
    brand: String,
    model: String,
    fuel: String,
    gear: String,
    year_model: i32,
}

impl NormalizedAttributes {
    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn fuel(&self) -> &str {
        &self.fuel
    }

    pub fn gear(&self) -> &str {
        &self.gear
    }

    pub fn year_model(&self) -> i32 {
        self.year_model
    }
}

impl From<&VehicleAttributes> for NormalizedAttributes {
    fn from(attributes: &VehicleAttributes) -> Self {
        Self {
            brand: normalize(&attributes.brand),
            model: normalize(&attributes.model),
            fuel: normalize(&attributes.fuel),
            gear: normalize(&attributes.gear),
            year_model: attributes.year_model,
        }
    }
}

/// Historical record with normalized attributes
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub attributes: NormalizedAttributes,
    pub avg_price: f64,
}

impl From<&Record> for NormalizedRecord {
    fn from(record: &Record) -> Self {
        Self {
            attributes: NormalizedAttributes::from(&record.attributes),
            avg_price: record.avg_price,
        }
    }
}
