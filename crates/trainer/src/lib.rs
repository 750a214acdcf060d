//! Price Model Training
//!
//! Runs the training side of the pipeline and produces the artifact that
//! inference consumes: the fitted model plus the frozen column list.

mod config;
mod evaluation;
mod pipeline;
mod split;

pub use config::TrainingConfig;
pub use evaluation::Metrics;
pub use pipeline::{TrainingOutcome, TrainingPipeline, TrainingReport};
pub use split::{train_test_split, Split};

use feature_engine::FeatureError;
use inference_engine::{InferenceError, RegressionError};
use std::path::PathBuf;
use storage::StorageError;
use thiserror::Error;

/// Errors that abort a training run
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Data source not found: {} ({reason})", .path.display())]
    MissingDataSource { path: PathBuf, reason: String },
    #[error("Insufficient data: {usable} usable rows out of {loaded} loaded")]
    InsufficientData { loaded: usize, usable: usize },
    #[error("Invalid training configuration: {0}")]
    InvalidConfig(String),
    #[error("Feature preparation failed: {0}")]
    Feature(#[from] FeatureError),
    #[error("Model fitting failed: {0}")]
    Regression(#[from] RegressionError),
    #[error("Artifact assembly failed: {0}")]
    Artifact(#[from] InferenceError),
    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),
}
