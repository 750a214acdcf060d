//! Record Validator

use crate::error::ValidationError;
use crate::record::{RawRecord, Record, VehicleAttributes};
use tracing::{debug, warn};

/// Outcome of validating a batch of raw rows
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Rows that passed validation
    pub records: Vec<Record>,
    /// Rows dropped because a field was null
    pub dropped_null: usize,
    /// Rows dropped because the price was negative or not finite
    pub dropped_invalid: usize,
}

impl ValidationReport {
    /// Total rows inspected
    pub fn rows_checked(&self) -> usize {
        self.records.len() + self.dropped_null + self.dropped_invalid
    }
}

/// Validator turning raw dataset rows into complete records
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Validate one raw row
    pub fn validate(&self, raw: RawRecord) -> Result<Record, ValidationError> {
        let brand = raw.brand.ok_or(ValidationError::MissingField("brand"))?;
        let model = raw.model.ok_or(ValidationError::MissingField("model"))?;
        let fuel = raw.fuel.ok_or(ValidationError::MissingField("fuel"))?;
        let gear = raw.gear.ok_or(ValidationError::MissingField("gear"))?;
        let year_model = raw
            .year_model
            .ok_or(ValidationError::MissingField("year_model"))?;
        let avg_price = raw
            .avg_price
            .ok_or(ValidationError::MissingField("avg_price"))?;

        self.validate_price(avg_price)?;

        Ok(Record {
            attributes: VehicleAttributes {
                brand,
                model,
                fuel,
                gear,
                year_model,
            },
            avg_price,
        })
    }

    /// Validate a price value
    pub fn validate_price(&self, price: f64) -> Result<(), ValidationError> {
        if !price.is_finite() {
            Err(ValidationError::NonFinitePrice(price))
        } else if price < 0.0 {
            Err(ValidationError::NegativePrice(price))
        } else {
            Ok(())
        }
    }

    /// Validate a batch, discarding rows with nulls or invalid prices
    pub fn validate_all<I>(&self, rows: I) -> ValidationReport
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut report = ValidationReport::default();

        for raw in rows {
            match self.validate(raw) {
                Ok(record) => report.records.push(record),
                Err(ValidationError::MissingField(field)) => {
                    debug!("Dropping row with null {}", field);
                    report.dropped_null += 1;
                }
                Err(e) => {
                    warn!("Dropping invalid row: {}", e);
                    report.dropped_invalid += 1;
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RawRecord {
        RawRecord {
            brand: Some("Fiat".to_string()),
            model: Some("Uno".to_string()),
            fuel: Some("Gasoline".to_string()),
            gear: Some("manual".to_string()),
            year_model: Some(2015),
            avg_price: Some(30_000.0),
        }
    }

    #[test]
    fn test_valid_record() {
        let record = Validator::new().validate(complete()).unwrap();
        assert_eq!(record.attributes.brand, "Fiat");
        assert_eq!(record.attributes.year_model, 2015);
        assert_eq!(record.avg_price, 30_000.0);
    }

    #[test]
    fn test_missing_field() {
        let raw = RawRecord {
            gear: None,
            ..complete()
        };
        assert_eq!(
            Validator::new().validate(raw),
            Err(ValidationError::MissingField("gear"))
        );
    }

    #[test]
    fn test_price_checks() {
        let validator = Validator::new();
        assert!(validator.validate_price(0.0).is_ok());
        assert!(validator.validate_price(-1.0).is_err());
        assert!(validator.validate_price(f64::NAN).is_err());
        assert!(validator.validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_all_counts_drops() {
        let rows = vec![
            complete(),
            RawRecord {
                brand: None,
                ..complete()
            },
            RawRecord {
                avg_price: Some(-5.0),
                ..complete()
            },
            complete(),
        ];

        let report = Validator::new().validate_all(rows);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.dropped_null, 1);
        assert_eq!(report.dropped_invalid, 1);
        assert_eq!(report.rows_checked(), 4);
    }
}
