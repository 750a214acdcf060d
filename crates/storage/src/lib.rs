//! Storage Layer
//!
//! Reads the historical price dataset from CSV and persists trained
//! artifacts as JSON documents.

mod dataset;
mod repository;

pub use dataset::{load_dataset, read_dataset, PRICE_COLUMN, PRICE_COLUMN_ALIAS, REQUIRED_COLUMNS};
pub use repository::ArtifactRepository;

use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Data source not found: {}", .0.display())]
    DataSourceNotFound(PathBuf),
    #[error("Malformed data source: {0}")]
    MalformedDataSource(String),
    #[error("Artifact not found: {}", .0.display())]
    ArtifactNotFound(PathBuf),
    #[error("I/O error on {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
