//! Prediction Routes

use axum::{extract::State, Json};
use data_validator::PriceRequest;
use inference_engine::PriceEstimate;
use metrics::counter;

use crate::error::ApiError;
use crate::SharedState;

/// Estimate the price of one vehicle
pub async fn predict(
    State(state): State<SharedState>,
    Json(request): Json<PriceRequest>,
) -> Result<Json<PriceEstimate>, ApiError> {
    let estimator = state.estimator.as_ref().ok_or(ApiError::ModelNotLoaded)?;
    let estimate = estimator.estimate(&request)?;

    counter!("pricer_predictions_total").increment(1);
    if estimate.degraded {
        counter!("pricer_degraded_predictions_total").increment(1);
    }

    Ok(Json(estimate))
}
