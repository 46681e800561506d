//! API endpoint handlers

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ServerError;
use axum::{extract::State, Json};
use fraudlens_core::{ScoringConfig, TransactionInput};
use fraudlens_runtime::MetricsSnapshot;
use tracing::{error, info};

/// Health check endpoint
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let classifier = state.engine.classifier();
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_loaded: classifier.is_loaded(),
        model_name: classifier.name().to_string(),
    })
}

/// Transaction scoring endpoint
#[axum::debug_handler]
pub(super) async fn score_transaction(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<TransactionInput>,
) -> Json<TransactionResponse> {
    info!(
        tx_id = %payload.tx_id,
        user_id = payload.user_id,
        features = payload.features.len(),
        "Received transaction"
    );

    let response = state.engine.process(&payload);
    Json(response.into())
}

/// Current scoring configuration
pub(super) async fn get_policy(State(state): State<AppState>) -> Json<ScoringConfig> {
    Json(state.engine.config_snapshot().as_ref().clone())
}

/// Replace the scoring configuration
pub(super) async fn update_policy(
    State(state): State<AppState>,
    JsonExtractor(policy): JsonExtractor<ScoringConfig>,
) -> Json<PolicyResponse> {
    info!(
        ml_threshold = policy.ml_threshold,
        rule_threshold = policy.rule_threshold,
        "Received policy update"
    );

    state.engine.update_config(policy);

    Json(PolicyResponse {
        success: true,
        message: "Policy updated successfully".to_string(),
        policy: state.engine.config_snapshot().as_ref().clone(),
    })
}

/// Re-read the configured policy file
pub(super) async fn reload_policy(
    State(state): State<AppState>,
) -> Result<Json<PolicyResponse>, ServerError> {
    info!("Received policy reload request");

    let policy = state.engine.reload_policy().map_err(|e| {
        error!(error = %e, "Failed to reload policy");
        ServerError::from(e)
    })?;

    info!("Policy reloaded successfully");
    Ok(Json(PolicyResponse {
        success: true,
        message: "Policy reloaded successfully".to_string(),
        policy: policy.as_ref().clone(),
    }))
}

/// Metrics endpoint
pub(super) async fn metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.engine.metrics())
}
