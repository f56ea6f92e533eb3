//! HTTP API for the ROI engine.
//!
//! This module exposes a small REST API around the calculator using
//! the [`axum`](https://crates.io/crates/axum) framework.  Clients
//! submit a calculator input and receive the results record as JSON;
//! the tier catalog and default input are available for building a
//! form.

use crate::catalog::TierCatalog;
use crate::config::ServerConfig;
use crate::engine::Calculator;
use crate::error::RoiError;
use crate::models::{CalculationResult, CalculatorInput, ProductTier};
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Application state shared across requests.
pub struct AppState {
    pub calculator: Calculator,
}

/// Request body for `POST /api/compare`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CompareRequest {
    pub input: CalculatorInput,
    /// Keep the input's nightly rate for every tier instead of each
    /// tier's suggested rate.
    pub keep_rate: bool,
}

/// Error body returned by every handler.
pub struct ApiError(RoiError);

impl From<RoiError> for ApiError {
    fn from(err: RoiError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected request body");
        ApiError(RoiError::invalid("body", rejection.body_text()))
    }
}

/// JSON request body whose rejections are reported as [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RoiError::TierNotFound { .. } => StatusCode::NOT_FOUND,
            RoiError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({"error": self.0.to_string()}));
        (status, body).into_response()
    }
}

/// Build the API router around an existing calculator.
pub fn build_router(calculator: Calculator) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState { calculator });
    let router = Router::new()
        .route("/api/tiers", get(list_tiers))
        .route("/api/tiers/:id", get(get_tier))
        .route("/api/defaults", get(defaults))
        .route("/api/calculate", post(calculate_handler))
        .route("/api/compare", post(compare_handler))
        .route("/api/batch", post(batch_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());
    (router, state)
}

/// Load the calculator's configuration and tier catalog as described
/// by `config`.
pub fn load_calculator(config: &ServerConfig) -> Result<Calculator> {
    let roi_config = config
        .roi_config()
        .context("failed to load ROI configuration")?;
    let catalog = match &config.tier_dir {
        Some(dir) => TierCatalog::load_from_dir(dir)
            .with_context(|| format!("failed to load tiers from {}", dir.display()))?,
        None => TierCatalog::default(),
    };
    Ok(Calculator::new(roi_config, catalog))
}

async fn list_tiers(State(app_state): State<Arc<AppState>>) -> Json<Vec<ProductTier>> {
    Json(app_state.calculator.catalog().tiers().to_vec())
}

async fn get_tier(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProductTier>, ApiError> {
    let tier = app_state.calculator.catalog().lookup(&id)?;
    Ok(Json(tier.clone()))
}

async fn defaults() -> Json<CalculatorInput> {
    Json(CalculatorInput::default())
}

/// Handler for POST /api/calculate
async fn calculate_handler(
    State(app_state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<CalculatorInput>,
) -> Result<Json<CalculationResult>, ApiError> {
    if let Err(err) = input.validate() {
        warn!(error = %err, "rejected calculator input");
        return Err(err.into());
    }
    let result = app_state.calculator.compute(&input);
    info!(tier = %result.tier, net_income = result.net_income, "calculated ROI");
    Ok(Json(result))
}

async fn compare_handler(
    State(app_state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CompareRequest>,
) -> Result<Json<Vec<CalculationResult>>, ApiError> {
    request.input.validate()?;
    let results = app_state
        .calculator
        .compare_tiers(&request.input, request.keep_rate);
    Ok(Json(results))
}

async fn batch_handler(
    State(app_state): State<Arc<AppState>>,
    ApiJson(inputs): ApiJson<Vec<CalculatorInput>>,
) -> Result<Json<Vec<CalculationResult>>, ApiError> {
    for input in &inputs {
        input.validate()?;
    }
    info!(scenarios = inputs.len(), "calculating batch");
    Ok(Json(app_state.calculator.compute_batch(&inputs)))
}

/// Launch the API server.  This function builds the calculator from
/// `config`, binds to its address and blocks until the server is
/// interrupted.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let calculator = load_calculator(&config)?;
    let (router, _state) = build_router(calculator);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "server listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
