//! REST API type definitions

use fraudlens_core::{DecisionStatus, ProbabilitySource, RuleOutcomeSet, ScoringConfig};
use fraudlens_sdk::{ScoringEngine, ScoringResponse};
use serde::Serialize;
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ScoringEngine>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model_loaded: bool,
    pub model_name: String,
}

/// Response to `POST /transactions`
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Request ID (for tracking and correlation)
    pub request_id: String,

    /// Final fraud verdict
    pub fraud: bool,

    pub status: DecisionStatus,

    pub ml_probability: f64,

    pub rule_score: f64,

    /// Per-rule flags, `{"R1": 0|1, ...}`
    pub fired_rules: RuleOutcomeSet,

    pub probability_source: ProbabilitySource,

    pub processing_time_ms: u64,
}

impl From<ScoringResponse> for TransactionResponse {
    fn from(response: ScoringResponse) -> Self {
        let result = response.result;
        Self {
            request_id: response.request_id,
            fraud: result.is_fraud(),
            status: result.status(),
            ml_probability: result.probability(),
            rule_score: result.rule_score(),
            fired_rules: *result.fired_rules(),
            probability_source: result.probability_source(),
            processing_time_ms: response.processing_time_ms,
        }
    }
}

/// Response to policy updates and reloads
#[derive(Debug, Serialize)]
pub struct PolicyResponse {
    pub success: bool,
    pub message: String,
    pub policy: ScoringConfig,
}
