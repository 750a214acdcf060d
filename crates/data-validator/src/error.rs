//! Validation Error Types

use thiserror::Error;

/// Errors during record validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Price below zero
    #[error("Negative price: {0}")]
    NegativePrice(f64),

    /// Price is NaN or infinite
    #[error("Non-finite price: {0}")]
    NonFinitePrice(f64),
}
