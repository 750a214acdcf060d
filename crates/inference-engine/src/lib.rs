//! Price Inference Engine
//!
//! Provides the regression stage, the trained artifact that pairs a fitted
//! model with its frozen column list, and the estimator that turns a single
//! request into a price.

mod artifact;
mod engine;
mod regression;

pub use artifact::TrainedArtifact;
pub use engine::{PriceEstimate, PriceEstimator};
pub use regression::{LinearModel, Predictor, RegressionError, Regressor, RidgeRegression};

use feature_engine::FeatureError;
use std::path::PathBuf;
use storage::StorageError;
use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("No trained model at {}; run training first", .0.display())]
    MissingArtifact(PathBuf),
    #[error("Artifact is inconsistent: {0}")]
    CorruptArtifact(String),
    #[error("Feature preparation failed: {0}")]
    Feature(#[from] FeatureError),
    #[error("Prediction failed: {0}")]
    Regression(#[from] RegressionError),
    #[error("Model estimated a negative price ({0:.2})")]
    NegativeEstimate(f64),
    #[error("Artifact storage failed: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for InferenceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ArtifactNotFound(path) => InferenceError::MissingArtifact(path),
            other => InferenceError::Storage(other),
        }
    }
}
