//! Log Price Target Transform
//!
//! Prices are right-skewed, so models are fitted on `ln(1 + price)` and
//! predictions are mapped back with `exp(y) - 1`.

use crate::error::FeatureError;
use ndarray::Array1;

/// Map a price to log space
pub fn forward(price: f64) -> Result<f64, FeatureError> {
    if !price.is_finite() || price < 0.0 {
        return Err(FeatureError::InvalidTarget(price));
    }
    Ok(price.ln_1p())
}

/// Map a log-space value back to a price
pub fn inverse(log_price: f64) -> f64 {
    log_price.exp_m1()
}

/// Map a batch of prices to log space
pub fn forward_all(prices: &[f64]) -> Result<Array1<f64>, FeatureError> {
    prices.iter().map(|p| forward(*p)).collect()
}

/// Map a batch of log-space values back to prices
pub fn inverse_all(log_prices: &Array1<f64>) -> Array1<f64> {
    log_prices.mapv(inverse)
}
