//! Training Configuration

use crate::TrainingError;
use serde::{Deserialize, Serialize};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Share of rows held out for evaluation (0 disables evaluation)
    pub test_fraction: f64,
    /// Seed for the hold-out shuffle
    pub seed: u64,
    /// L2 penalty of the ridge regression
    pub ridge_alpha: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            ridge_alpha: 1e-3,
        }
    }
}

impl TrainingConfig {
    /// Config that fits on every row and skips evaluation
    pub fn without_holdout() -> Self {
        Self {
            test_fraction: 0.0,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), TrainingError> {
        if !(0.0..1.0).contains(&self.test_fraction) {
            return Err(TrainingError::InvalidConfig(format!(
                "test_fraction must be in [0, 1), got {}",
                self.test_fraction
            )));
        }
        if !(self.ridge_alpha.is_finite() && self.ridge_alpha > 0.0) {
            return Err(TrainingError::InvalidConfig(format!(
                "ridge_alpha must be positive, got {}",
                self.ridge_alpha
            )));
        }
        Ok(())
    }
}
