//! Feature Error Types

use thiserror::Error;

/// Errors during encoding, alignment or target transformation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Nothing to encode
    #[error("Cannot encode an empty set of rows")]
    EmptyInput,

    /// Column names and matrix width disagree
    #[error("Shape mismatch: expected {expected} columns, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Column listed more than once
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// Alignment of a request needs exactly one row
    #[error("Expected a single row, got {0}")]
    NotSingleRow(usize),

    /// Target outside the domain of the log transform
    #[error("Invalid target value {0}: prices must be finite and non-negative")]
    InvalidTarget(f64),
}
