//! Regression Stage
//!
//! Any algorithm implementing [`Regressor`] can be plugged into training, as
//! long as its fitted model implements [`Predictor`] over feature vectors
//! in the frozen column order.

use linfa::traits::Fit;
use linfa::Dataset;
use linfa_elasticnet::ElasticNet;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors while fitting or evaluating a regression
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    #[error("Cannot fit on an empty training set")]
    EmptyTrainingSet,
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Regularization strength must be positive and finite, got {0}")]
    InvalidAlpha(f64),
    #[error("Solver failed: {0}")]
    Solver(String),
    #[error("Model produced a non-finite prediction")]
    NonFinitePrediction,
}

/// A fitted model mapping one feature vector to one scalar
pub trait Predictor: Send + Sync {
    /// Number of features the model expects
    fn n_features(&self) -> usize;

    /// Predict a single row
    fn predict_row(&self, features: ArrayView1<'_, f64>) -> Result<f64, RegressionError>;

    /// Predict every row of a matrix
    fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>, RegressionError> {
        features
            .rows()
            .into_iter()
            .map(|row| self.predict_row(row))
            .collect()
    }
}

/// A learning algorithm producing a [`Predictor`]
pub trait Regressor {
    type Model: Predictor;

    fn fit(
        &self,
        features: ArrayView2<'_, f64>,
        targets: ArrayView1<'_, f64>,
    ) -> Result<Self::Model, RegressionError>;
}

/// Linear model `y = w . x + b`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl Predictor for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_row(&self, features: ArrayView1<'_, f64>) -> Result<f64, RegressionError> {
        if features.len() != self.coefficients.len() {
            return Err(RegressionError::DimensionMismatch {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        let y = self
            .coefficients
            .iter()
            .zip(features.iter())
            .fold(self.intercept, |acc, (w, x)| acc + w * x);

        if y.is_finite() {
            Ok(y)
        } else {
            Err(RegressionError::NonFinitePrediction)
        }
    }
}

/// Ridge regression fitted with `linfa-elasticnet` (no L1 share)
///
/// Full one-hot encoding makes the indicator columns of each field sum to
/// one, which is collinear with the intercept. The L2 penalty keeps the
/// fit well defined. The intercept is not penalized. Columns that are
/// constant over the training rows carry no signal and get a zero weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RidgeRegression {
    pub alpha: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl RidgeRegression {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            tolerance: 1e-7,
            max_iterations: 2_000,
        }
    }
}

impl Default for RidgeRegression {
    fn default() -> Self {
        Self::new(1e-3)
    }
}

impl Regressor for RidgeRegression {
    type Model = LinearModel;

    fn fit(
        &self,
        features: ArrayView2<'_, f64>,
        targets: ArrayView1<'_, f64>,
    ) -> Result<LinearModel, RegressionError> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(RegressionError::InvalidAlpha(self.alpha));
        }

        let (n, p) = features.dim();
        if targets.len() != n {
            return Err(RegressionError::DimensionMismatch {
                expected: n,
                actual: targets.len(),
            });
        }

        let x_mean = features
            .mean_axis(Axis(0))
            .ok_or(RegressionError::EmptyTrainingSet)?;
        let y_mean = targets.mean().ok_or(RegressionError::EmptyTrainingSet)?;

        let varying: Vec<usize> = (0..p)
            .filter(|&j| features.column(j).iter().any(|&v| v != x_mean[j]))
            .collect();

        let mut coefficients = Array1::<f64>::zeros(p);
        if !varying.is_empty() {
            let dataset = Dataset::new(
                features.select(Axis(1), &varying),
                targets.to_owned(),
            );
            let fitted = ElasticNet::params()
                .penalty(self.alpha)
                .l1_ratio(0.0)
                .with_intercept(true)
                .tolerance(self.tolerance)
                .max_iterations(self.max_iterations)
                .fit(&dataset)
                .map_err(|e| RegressionError::Solver(e.to_string()))?;

            for (&j, &w) in varying.iter().zip(fitted.hyperplane().iter()) {
                coefficients[j] = w;
            }
        }
        let intercept = y_mean - x_mean.dot(&coefficients);

        debug!(
            "Fitted ridge regression on {} rows x {} features ({} varying)",
            n,
            p,
            varying.len()
        );

        Ok(LinearModel {
            coefficients: coefficients.to_vec(),
            intercept,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};
    use proptest::prelude::*;

    #[test]
    fn test_recovers_linear_relation() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![3.0, 5.0, 7.0, 9.0];

        let model = RidgeRegression::new(1e-9).fit(x.view(), y.view()).unwrap();

        assert!((model.coefficients[0] - 2.0).abs() < 1e-4);
        assert!((model.intercept - 1.0).abs() < 1e-3);
        let pred = model.predict_row(array![10.0].view()).unwrap();
        assert!((pred - 21.0).abs() < 1e-3);
    }

    #[test]
    fn test_handles_collinear_one_hot() {
        // Two indicator columns that always sum to one.
        let x = array![[1.0, 0.0], [0.0, 1.0], [1.0, 0.0], [0.0, 1.0]];
        let y = array![10.0, 20.0, 10.0, 20.0];

        let model = RidgeRegression::default().fit(x.view(), y.view()).unwrap();
        let pred = model.predict(x.view()).unwrap();

        for (p, t) in pred.iter().zip(y.iter()) {
            assert!((p - t).abs() < 5e-2);
        }
    }

    #[test]
    fn test_single_row_predicts_target() {
        let x = array![[2015.0, 1.0]];
        let y = array![10.0];
        let model = RidgeRegression::default().fit(x.view(), y.view()).unwrap();
        assert!((model.predict_row(x.row(0)).unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_errors() {
        let empty = Array2::<f64>::zeros((0, 2));
        assert_eq!(
            RidgeRegression::default()
                .fit(empty.view(), Array1::zeros(0).view())
                .unwrap_err(),
            RegressionError::EmptyTrainingSet
        );

        let x = array![[1.0], [2.0]];
        assert_eq!(
            RidgeRegression::default()
                .fit(x.view(), array![1.0].view())
                .unwrap_err(),
            RegressionError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            RidgeRegression::new(0.0)
                .fit(x.view(), array![1.0, 2.0].view())
                .unwrap_err(),
            RegressionError::InvalidAlpha(0.0)
        );
    }

    #[test]
    fn test_predict_checks_width() {
        let model = LinearModel {
            coefficients: vec![1.0, 2.0],
            intercept: 0.0,
        };
        assert_eq!(
            model.predict_row(array![1.0].view()),
            Err(RegressionError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_constant_columns_get_zero_weight() {
        let x = array![[2015.0, 1.0], [2018.0, 1.0], [2020.0, 1.0]];
        let y = array![10.0, 10.6, 11.0];

        let model = RidgeRegression::default().fit(x.view(), y.view()).unwrap();

        assert_eq!(model.coefficients[1], 0.0);
        assert!(model.coefficients[0] > 0.0);
    }

    proptest! {
        #[test]
        fn prop_predict_returns_one_value_per_row(
            coefficients in prop::collection::vec(-10.0f64..10.0, 1..8),
            intercept in -100.0f64..100.0,
            rows in 0usize..20,
        ) {
            let width = coefficients.len();
            let model = LinearModel { coefficients, intercept };
            let x = Array2::from_shape_fn((rows, width), |(i, j)| (i * width + j) as f64 * 0.1);

            let predictions = model.predict(x.view()).unwrap();
            prop_assert_eq!(predictions.len(), rows);

            let narrow = Array2::<f64>::zeros((1, width + 1));
            prop_assert!(model.predict(narrow.view()).is_err());
        }
    }
}
