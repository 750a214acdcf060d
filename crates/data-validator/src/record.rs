//! Vehicle Record Types

use serde::{Deserialize, Serialize};

/// Attributes describing one vehicle, as supplied by a caller or a dataset row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleAttributes {
    pub brand: String,
    pub model: String,
    pub fuel: String,
    pub gear: String,
    pub year_model: i32,
}

impl VehicleAttributes {
    /// Create attributes from any string-like values
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        fuel: impl Into<String>,
        gear: impl Into<String>,
        year_model: i32,
    ) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            fuel: fuel.into(),
            gear: gear.into(),
            year_model,
        }
    }
}

/// A pricing request carries the attributes of one vehicle and no label
pub type PriceRequest = VehicleAttributes;

/// Historical observation: vehicle attributes plus the reference price
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub attributes: VehicleAttributes,
    /// Average price in currency units, never negative
    pub avg_price: f64,
}

/// Dataset row before null filtering; any field may be absent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub fuel: Option<String>,
    pub gear: Option<String>,
    pub year_model: Option<i32>,
    pub avg_price: Option<f64>,
}

impl From<Record> for RawRecord {
    fn from(record: Record) -> Self {
        let VehicleAttributes {
            brand,
            model,
            fuel,
            gear,
            year_model,
        } = record.attributes;
        Self {
            brand: Some(brand),
            model: Some(model),
            fuel: Some(fuel),
            gear: Some(gear),
            year_model: Some(year_model),
            avg_price: Some(record.avg_price),
        }
    }
}
