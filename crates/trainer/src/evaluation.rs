//! Hold-out Evaluation Metrics

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Error metrics in currency units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Mean absolute error
    pub mae: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Coefficient of determination
    pub r2: f64,
}

impl Metrics {
    /// Score predictions against actual values; `None` when there is nothing to score
    pub fn compute(actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>) -> Option<Self> {
        let n = actual.len();
        if n == 0 || predicted.len() != n {
            return None;
        }

        let residuals = &actual - &predicted;
        let mae = residuals.mapv(f64::abs).sum() / n as f64;
        let ss_res = residuals.mapv(|r| r * r).sum();
        let rmse = (ss_res / n as f64).sqrt();

        let mean = actual.sum() / n as f64;
        let ss_tot = actual.mapv(|y| (y - mean) * (y - mean)).sum();
        let r2 = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            0.0
        };

        Some(Self { mae, rmse, r2 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_perfect_prediction() {
        let y = array![1.0, 2.0, 3.0];
        let m = Metrics::compute(y.view(), y.view()).unwrap();
        assert_eq!(m.mae, 0.0);
        assert_eq!(m.rmse, 0.0);
        assert_eq!(m.r2, 1.0);
    }

    #[test]
    fn test_known_errors() {
        let actual = array![10.0, 20.0, 30.0, 40.0];
        let predicted = array![12.0, 18.0, 33.0, 37.0];
        let m = Metrics::compute(actual.view(), predicted.view()).unwrap();

        assert!((m.mae - 2.5).abs() < 1e-12);
        assert!((m.rmse - 6.5f64.sqrt()).abs() < 1e-12);
        // ss_res = 26, ss_tot = 500
        assert!((m.r2 - (1.0 - 26.0 / 500.0)).abs() < 1e-12);
    }

    #[test]
    fn test_constant_target() {
        let actual = array![5.0, 5.0];
        let m = Metrics::compute(actual.view(), array![4.0, 6.0].view()).unwrap();
        assert_eq!(m.r2, 0.0);
    }

    #[test]
    fn test_nothing_to_score() {
        let empty = ndarray::Array1::<f64>::zeros(0);
        assert!(Metrics::compute(empty.view(), empty.view()).is_none());
    }
}
