//! Trained Artifact

use crate::regression::{LinearModel, Predictor};
use crate::InferenceError;
use feature_engine::FrozenColumns;
use serde::{Deserialize, Serialize};

/// Fitted model paired with the ordered column list it was trained on
///
/// Built once per training run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedArtifact<M = LinearModel> {
    model: M,
    columns: FrozenColumns,
}

impl<M: Predictor> TrainedArtifact<M> {
    /// Pair a model with its columns, checking that their widths agree
    pub fn new(model: M, columns: FrozenColumns) -> Result<Self, InferenceError> {
        let artifact = Self { model, columns };
        artifact.check()?;
        Ok(artifact)
    }

    /// Verify the model expects exactly one input per frozen column
    pub fn check(&self) -> Result<(), InferenceError> {
        if self.model.n_features() != self.columns.len() {
            return Err(InferenceError::CorruptArtifact(format!(
                "model expects {} features but {} columns are frozen",
                self.model.n_features(),
                self.columns.len()
            )));
        }
        Ok(())
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn columns(&self) -> &FrozenColumns {
        &self.columns
    }
}
