//! Vehicle Price API Server
//!
//! REST API over the trained price estimator, plus the training and
//! one-shot prediction commands used by the `fipe-pricer` binary.

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use data_validator::{BrandAllowlist, CategoryCatalog, NormalizedAttributes, PriceRequest, Validator};
use inference_engine::{InferenceError, PriceEstimate, PriceEstimator};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use storage::ArtifactRepository;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use trainer::{TrainingError, TrainingPipeline, TrainingReport};

mod config;
mod error;
mod routes;

pub use config::{AppConfig, DataConfig, ServerConfig};
pub use error::{ApiError, ErrorBody};

/// Command line usage
pub const USAGE: &str =
    "usage: fipe-pricer [serve | train | predict <brand> <model> <fuel> <gear> <year_model>]";

/// Application state shared across handlers
///
/// Read-only after startup, so handlers share it through an `Arc` alone.
pub struct AppState {
    /// Estimator, absent until a model has been trained
    pub estimator: Option<PriceEstimator>,
    /// Known categories for client choices
    pub catalog: CategoryCatalog,
    /// Prometheus exporter, absent when no recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Create new application state
    pub fn new(estimator: Option<PriceEstimator>, catalog: CategoryCatalog) -> Self {
        Self {
            estimator,
            catalog,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Load the persisted estimator and the category catalog
    ///
    /// A missing artifact leaves the server up without an estimator.
    pub fn load(config: &AppConfig) -> Result<Self, InferenceError> {
        let repository = ArtifactRepository::new(config.data.artifact_path.clone());
        let estimator = match PriceEstimator::load(&repository) {
            Ok(estimator) => Some(estimator),
            Err(InferenceError::MissingArtifact(path)) => {
                warn!(
                    "No trained artifact at {}; predictions are disabled until training runs",
                    path.display()
                );
                None
            }
            Err(e) => return Err(e),
        };

        let catalog = load_catalog(&config.data.dataset_path, &BrandAllowlist::default());
        Ok(Self::new(estimator, catalog))
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: ComponentStatus,
}

/// Component status
#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub model: ComponentHealth,
    pub catalog: ComponentHealth,
}

/// Individual component health
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: String,
    /// Frozen columns for the model, brands for the catalog
    pub size: usize,
}

/// Create the application router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/predict", post(routes::predictions::predict))
        .route("/api/v1/options", get(routes::options::get_options))
        .route("/api/v1/options/models", get(routes::options::get_models))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let model = match &state.estimator {
        Some(estimator) => ComponentHealth {
            status: "ok".to_string(),
            size: estimator.artifact().columns().len(),
        },
        None => ComponentHealth {
            status: "missing".to_string(),
            size: 0,
        },
    };
    let catalog = ComponentHealth {
        status: if state.catalog.is_empty() { "empty" } else { "ok" }.to_string(),
        size: state.catalog.brands.len(),
    };

    let status = if state.estimator.is_some() { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        components: ComponentStatus { model, catalog },
    })
}

/// Prometheus scrape handler
async fn metrics_handler(State(state): State<SharedState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Build the category catalog from the dataset; empty when it cannot be read
pub fn load_catalog(dataset: &Path, allowlist: &BrandAllowlist) -> CategoryCatalog {
    match storage::load_dataset(dataset) {
        Ok(rows) => {
            let report = Validator::new().validate_all(rows);
            let attributes: Vec<NormalizedAttributes> = report
                .records
                .iter()
                .map(|record| NormalizedAttributes::from(&record.attributes))
                .collect();
            let catalog = CategoryCatalog::build(&attributes, allowlist);
            info!(
                "Category catalog: {} brands, {} fuels, {} gears",
                catalog.brands.len(),
                catalog.fuels.len(),
                catalog.gears.len()
            );
            catalog
        }
        Err(e) => {
            warn!("Category catalog unavailable: {}", e);
            CategoryCatalog::default()
        }
    }
}

/// Train on the configured dataset and persist the artifact
pub fn train(config: &AppConfig) -> Result<TrainingReport, TrainingError> {
    let pipeline = TrainingPipeline::new(config.training.clone(), BrandAllowlist::default());
    let repository = ArtifactRepository::new(config.data.artifact_path.clone());
    let report = pipeline.run(&config.data.dataset_path, &repository)?;

    match &report.metrics {
        Some(m) => info!(
            "Training finished: {} rows, {} columns, MAE {:.2}, RMSE {:.2}, R² {:.4}",
            report.rows_used, report.n_columns, m.mae, m.rmse, m.r2
        ),
        None => info!(
            "Training finished: {} rows, {} columns, no hold-out evaluation",
            report.rows_used, report.n_columns
        ),
    }
    Ok(report)
}

/// Estimate one price with the persisted artifact
pub fn predict_once(config: &AppConfig, request: &PriceRequest) -> Result<PriceEstimate, InferenceError> {
    let repository = ArtifactRepository::new(config.data.artifact_path.clone());
    PriceEstimator::load(&repository)?.estimate(request)
}

/// Parse `<brand> <model> <fuel> <gear> <year_model>` arguments
pub fn parse_request(args: &[String]) -> anyhow::Result<PriceRequest> {
    let [brand, model, fuel, gear, year] = args else {
        anyhow::bail!("expected 5 arguments, got {}\n{}", args.len(), USAGE);
    };
    let year_model: i32 = year
        .parse()
        .with_context(|| format!("year_model must be an integer, got '{}'", year))?;

    Ok(PriceRequest::new(
        brand.as_str(),
        model.as_str(),
        fuel.as_str(),
        gear.as_str(),
        year_model,
    ))
}

/// Initialize logging
///
/// Honors `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server
pub async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install metrics recorder")?;

    let state = Arc::new(AppState::load(config)?.with_metrics(handle));
    let app = create_router(state);

    info!("Starting API server on {}", config.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
