//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inference_engine::InferenceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Errors returned by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No trained model is loaded; run `fipe-pricer train` first")]
    ModelNotLoaded,
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::ModelNotLoaded | ApiError::Inference(InferenceError::MissingArtifact(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Inference(InferenceError::Feature(_))
            | ApiError::Inference(InferenceError::Regression(_))
            | ApiError::Inference(InferenceError::NegativeEstimate(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::ModelNotLoaded | ApiError::Inference(InferenceError::MissingArtifact(_)) => {
                "model_not_loaded"
            }
            ApiError::Inference(InferenceError::Feature(_)) => "invalid_features",
            ApiError::Inference(InferenceError::Regression(_))
            | ApiError::Inference(InferenceError::NegativeEstimate(_)) => "prediction_failed",
            ApiError::Inference(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = ErrorBody {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
