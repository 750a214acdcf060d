//! Price Estimator

use crate::artifact::TrainedArtifact;
use crate::regression::{LinearModel, Predictor, RegressionError};
use crate::InferenceError;
use data_validator::{NormalizedAttributes, PriceRequest};
use feature_engine::{target, CategoricalEncoder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::ArtifactRepository;
use tracing::{debug, info, warn};

/// Price estimate for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    /// Estimated price in currency units
    pub price: f64,
    /// Raw model output in log space
    pub log_price: f64,
    /// Encoded columns of the request that training never produced
    pub unseen_categories: Vec<String>,
    /// Set when any categorical value was unknown to training
    pub degraded: bool,
}

/// Estimator holding a read-only trained artifact
///
/// Clones share the same artifact, so one estimator can serve concurrent
/// requests without locking.
#[derive(Debug)]
pub struct PriceEstimator<M = LinearModel> {
    artifact: Arc<TrainedArtifact<M>>,
    encoder: CategoricalEncoder,
}

impl<M> Clone for PriceEstimator<M> {
    fn clone(&self) -> Self {
        Self {
            artifact: Arc::clone(&self.artifact),
            encoder: self.encoder,
        }
    }
}

impl<M: Predictor> PriceEstimator<M> {
    /// Create an estimator from a trained artifact
    pub fn new(artifact: TrainedArtifact<M>) -> Self {
        info!(
            "Creating price estimator with {} frozen columns",
            artifact.columns().len()
        );
        Self {
            artifact: Arc::new(artifact),
            encoder: CategoricalEncoder::new(),
        }
    }

    pub fn artifact(&self) -> &TrainedArtifact<M> {
        &self.artifact
    }

    /// Estimate the price of one vehicle
    ///
    /// Categories unknown to training are not an error: they are zero-filled
    /// and reported on the estimate. An estimate that overflows or falls
    /// below zero after the inverse transform is rejected rather than
    /// clamped.
    pub fn estimate(&self, request: &PriceRequest) -> Result<PriceEstimate, InferenceError> {
        let normalized = NormalizedAttributes::from(request);
        let encoded = self.encoder.encode(std::slice::from_ref(&normalized))?;
        let alignment = self.artifact.columns().align(&encoded)?;

        if alignment.is_degraded() {
            warn!(
                "Request uses categories unseen in training: {:?}",
                alignment.unseen_categories()
            );
        }

        let log_price = self
            .artifact
            .model()
            .predict_row(alignment.vector.values())?;
        let price = target::inverse(log_price);
        if !price.is_finite() {
            return Err(RegressionError::NonFinitePrediction.into());
        }
        if price < 0.0 {
            return Err(InferenceError::NegativeEstimate(price));
        }

        debug!("Estimated {:.2} (log {:.4}) for {:?}", price, log_price, normalized);

        let degraded = alignment.is_degraded();
        Ok(PriceEstimate {
            price,
            log_price,
            unseen_categories: alignment.dropped,
            degraded,
        })
    }
}

impl PriceEstimator<LinearModel> {
    /// Load the persisted artifact backing this estimator
    pub fn load(repository: &ArtifactRepository) -> Result<Self, InferenceError> {
        let artifact: TrainedArtifact<LinearModel> = repository.load()?;
        artifact.check()?;
        info!("Loaded trained artifact from {}", repository.path().display());
        Ok(Self::new(artifact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::FrozenColumns;

    /// Model: log_price = 10 + 0.01 * (year - 2000) + 0.5 * brand_fiat
    fn artifact() -> TrainedArtifact {
        let columns = FrozenColumns::new(vec![
            "year_model".into(),
            "brand_fiat".into(),
            "fuel_gasoline".into(),
        ])
        .unwrap();
        let model = LinearModel {
            coefficients: vec![0.01, 0.5, 0.0],
            intercept: 10.0 - 20.0,
        };
        TrainedArtifact::new(model, columns).unwrap()
    }

    fn request(brand: &str) -> PriceRequest {
        PriceRequest::new(brand, "uno", "Gasoline", "manual", 2015)
    }

    #[test]
    fn test_estimate_known_brand() {
        let estimator = PriceEstimator::new(artifact());
        let estimate = estimator.estimate(&request(" FIAT ")).unwrap();

        let expected_log = 10.0 - 20.0 + 0.01 * 2015.0 + 0.5;
        assert!((estimate.log_price - expected_log).abs() < 1e-9);
        assert!((estimate.price - expected_log.exp_m1()).abs() < 1e-6);
        // model and gear columns are unknown to this artifact
        assert_eq!(estimate.unseen_categories, vec!["model_uno", "gear_manual"]);
    }

    #[test]
    fn test_estimate_unseen_brand_is_flagged() {
        let estimator = PriceEstimator::new(artifact());
        let estimate = estimator.estimate(&request("toyota")).unwrap();

        let expected_log = 10.0 - 20.0 + 0.01 * 2015.0;
        assert!((estimate.log_price - expected_log).abs() < 1e-9);
        assert!(estimate.degraded);
        assert!(estimate
            .unseen_categories
            .contains(&"brand_toyota".to_string()));
    }

    #[test]
    fn test_clones_share_artifact() {
        let estimator = PriceEstimator::new(artifact());
        let clone = estimator.clone();
        assert!(std::ptr::eq(estimator.artifact(), clone.artifact()));
    }

    #[test]
    fn test_concurrent_estimates() {
        let estimator = PriceEstimator::new(artifact());
        let expected = estimator.estimate(&request("fiat")).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let estimator = estimator.clone();
                std::thread::spawn(move || estimator.estimate(&request("fiat")).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_load_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let repository = ArtifactRepository::new(dir.path().join("model.json"));
        assert!(matches!(
            PriceEstimator::load(&repository),
            Err(InferenceError::MissingArtifact(_))
        ));
    }

    #[test]
    fn test_load_saved_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let repository = ArtifactRepository::new(dir.path().join("model.json"));
        repository.save(&artifact()).unwrap();

        let estimator = PriceEstimator::load(&repository).unwrap();
        assert_eq!(estimator.artifact(), &artifact());
    }

    #[test]
    fn test_rejects_overflowing_estimate() {
        let estimator = PriceEstimator::new(artifact());
        let far_future = PriceRequest::new("fiat", "uno", "gasoline", "manual", 100_000);

        assert!(matches!(
            estimator.estimate(&far_future),
            Err(InferenceError::Regression(RegressionError::NonFinitePrediction))
        ));
    }

    #[test]
    fn test_rejects_negative_estimate() {
        let estimator = PriceEstimator::new(artifact());
        // log price of -1 maps to expm1(-1) < 0
        let far_past = PriceRequest::new("toyota", "uno", "gasoline", "manual", 900);

        match estimator.estimate(&far_past) {
            Err(InferenceError::NegativeEstimate(price)) => assert!(price < 0.0),
            other => panic!("expected a negative estimate error, got {:?}", other),
        }
    }
}
