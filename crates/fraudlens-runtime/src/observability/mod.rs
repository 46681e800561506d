//! Observability module
//!
//! Scoring counters exposed by the service's metrics endpoint.

pub mod metrics;

pub use metrics::{MetricsSnapshot, ScoringMetrics};
