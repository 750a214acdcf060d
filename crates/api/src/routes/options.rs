//! Category Option Routes

use axum::{
    extract::{Query, State},
    Json,
};
use data_validator::{normalize, CategoryCatalog};
use serde::{Deserialize, Serialize};

use crate::SharedState;

/// Query parameters for the models endpoint
#[derive(Debug, Deserialize)]
pub struct ModelsQuery {
    pub brand: String,
}

/// Models offered by one brand
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub brand: String,
    pub models: Vec<String>,
    pub count: usize,
}

/// Every known category
pub async fn get_options(State(state): State<SharedState>) -> Json<CategoryCatalog> {
    Json(state.catalog.clone())
}

/// Models known for a brand; the brand is matched after normalization
pub async fn get_models(
    State(state): State<SharedState>,
    Query(params): Query<ModelsQuery>,
) -> Json<ModelsResponse> {
    let brand = normalize(&params.brand);
    let models = state.catalog.models_for(&brand).to_vec();

    Json(ModelsResponse {
        count: models.len(),
        brand,
        models,
    })
}
