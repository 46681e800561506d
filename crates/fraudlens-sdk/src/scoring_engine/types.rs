//! Response types for ScoringEngine

use fraudlens_core::DecisionResult;
use serde::Serialize;

/// Outcome of scoring one transaction, with request identity and timing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringResponse {
    /// Engine-generated request ID (`req_YYYYMMDDHHMMSS_` + 16 hex digits)
    pub request_id: String,

    pub tx_id: String,

    pub user_id: i64,

    /// Decision result
    pub result: DecisionResult,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
