//! Training Pipeline

use crate::config::TrainingConfig;
use crate::evaluation::Metrics;
use crate::split::train_test_split;
use crate::TrainingError;
use data_validator::{BrandAllowlist, NormalizedAttributes, NormalizedRecord, RawRecord, Validator};
use feature_engine::{target, CategoricalEncoder, FrozenColumns};
use inference_engine::{Predictor, Regressor, RidgeRegression, TrainedArtifact};
use ndarray::Axis;
use serde::{Deserialize, Serialize};
use std::path::Path;
use storage::{ArtifactRepository, StorageError};
use tracing::{info, warn};

/// Row counts and scores of one training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Rows read from the source
    pub rows_loaded: usize,
    /// Rows left after dropping nulls and invalid prices
    pub rows_valid: usize,
    /// Rows left after brand filtering
    pub rows_used: usize,
    /// Size of the frozen column list
    pub n_columns: usize,
    pub n_train: usize,
    pub n_test: usize,
    /// Hold-out scores, absent when evaluation was skipped
    pub metrics: Option<Metrics>,
}

/// Artifact produced by a training run plus its report
#[derive(Debug, Clone)]
pub struct TrainingOutcome<M> {
    pub artifact: TrainedArtifact<M>,
    pub report: TrainingReport,
}

/// Training pipeline: validate, normalize, filter, encode, fit
#[derive(Debug, Clone)]
pub struct TrainingPipeline<R = RidgeRegression> {
    config: TrainingConfig,
    allowlist: BrandAllowlist,
    regressor: R,
    validator: Validator,
    encoder: CategoricalEncoder,
}

impl TrainingPipeline<RidgeRegression> {
    /// Create a pipeline fitting a ridge regression
    pub fn new(config: TrainingConfig, allowlist: BrandAllowlist) -> Self {
        let regressor = RidgeRegression::new(config.ridge_alpha);
        Self::with_regressor(config, allowlist, regressor)
    }
}

impl<R: Regressor> TrainingPipeline<R> {
    /// Create a pipeline with any regression algorithm
    pub fn with_regressor(config: TrainingConfig, allowlist: BrandAllowlist, regressor: R) -> Self {
        Self {
            config,
            allowlist,
            regressor,
            validator: Validator::new(),
            encoder: CategoricalEncoder::new(),
        }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn allowlist(&self) -> &BrandAllowlist {
        &self.allowlist
    }

    /// Train on rows already in memory
    pub fn train(&self, rows: Vec<RawRecord>) -> Result<TrainingOutcome<R::Model>, TrainingError> {
        self.config.validate()?;

        let rows_loaded = rows.len();
        let validated = self.validator.validate_all(rows);
        let rows_valid = validated.records.len();

        let normalized: Vec<NormalizedRecord> =
            validated.records.iter().map(NormalizedRecord::from).collect();
        let filtered = self.allowlist.filter(normalized);
        let rows_used = filtered.len();

        info!(
            "Training rows: loaded={}, valid={}, after brand filter={}",
            rows_loaded, rows_valid, rows_used
        );

        if filtered.is_empty() {
            return Err(TrainingError::InsufficientData {
                loaded: rows_loaded,
                usable: 0,
            });
        }

        let (attributes, prices): (Vec<NormalizedAttributes>, Vec<f64>) = filtered
            .into_iter()
            .map(|r| (r.attributes, r.avg_price))
            .unzip();

        let frame = self.encoder.encode(&attributes)?;
        let columns = FrozenColumns::from_frame(&frame);
        let log_prices = target::forward_all(&prices)?;

        info!("Frozen {} feature columns", columns.len());

        let split = train_test_split(rows_used, self.config.test_fraction, self.config.seed);

        let x_train = columns.align_frame(&frame.select_rows(&split.train));
        let y_train = log_prices.select(Axis(0), &split.train);
        let model = self.regressor.fit(x_train.view(), y_train.view())?;

        let metrics = if split.test.is_empty() {
            None
        } else {
            let x_test = columns.align_frame(&frame.select_rows(&split.test));
            let predicted = target::inverse_all(&model.predict(x_test.view())?);
            let actual = ndarray::Array1::from_iter(split.test.iter().map(|&i| prices[i]));
            Metrics::compute(actual.view(), predicted.view())
        };

        match &metrics {
            Some(m) => info!("Hold-out MAE: {:.2}, RMSE: {:.2}, R2: {:.4}", m.mae, m.rmse, m.r2),
            None => warn!("No hold-out rows, skipping evaluation"),
        }

        let report = TrainingReport {
            rows_loaded,
            rows_valid,
            rows_used,
            n_columns: columns.len(),
            n_train: split.train.len(),
            n_test: split.test.len(),
            metrics,
        };

        Ok(TrainingOutcome {
            artifact: TrainedArtifact::new(model, columns)?,
            report,
        })
    }

    /// Train on a CSV dataset
    pub fn train_from_csv(&self, dataset: &Path) -> Result<TrainingOutcome<R::Model>, TrainingError> {
        let rows = storage::load_dataset(dataset).map_err(|e| match e {
            StorageError::DataSourceNotFound(path) => TrainingError::MissingDataSource {
                path,
                reason: "file does not exist".to_string(),
            },
            StorageError::MalformedDataSource(reason) => TrainingError::MissingDataSource {
                path: dataset.to_path_buf(),
                reason,
            },
            other => TrainingError::Storage(other),
        })?;
        self.train(rows)
    }

    /// Train on a CSV dataset and persist the artifact
    pub fn run(
        &self,
        dataset: &Path,
        repository: &ArtifactRepository,
    ) -> Result<TrainingReport, TrainingError>
    where
        R::Model: Serialize,
    {
        let outcome = self.train_from_csv(dataset)?;
        repository.save(&outcome.artifact)?;
        Ok(outcome.report)
    }
}
