//! Data Validation and Normalization
//!
//! Provides record validation, categorical text normalization and brand
//! filtering for historical vehicle price data and pricing requests.

mod catalog;
mod error;
mod filter;
mod normalizer;
mod record;
mod validator;

pub use catalog::CategoryCatalog;
pub use error::ValidationError;
pub use filter::{BrandAllowlist, Branded};
pub use normalizer::{normalize, NormalizedAttributes, NormalizedRecord};
pub use record::{PriceRequest, RawRecord, Record, VehicleAttributes};
pub use validator::{ValidationReport, Validator};
