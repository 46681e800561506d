//! Scoring counters
//!
//! Lock-free counters updated once per decision. Latency is accumulated in
//! microseconds and reported as a mean in milliseconds.

use fraudlens_core::DecisionResult;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counters for decisions made by one engine
#[derive(Debug, Default)]
pub struct ScoringMetrics {
    decisions: AtomicU64,
    approved: AtomicU64,
    rejected: AtomicU64,
    ml_fallbacks: AtomicU64,
    latency_sum_us: AtomicU64,
}

/// Point-in-time copy of [`ScoringMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub decisions: u64,
    pub approved: u64,
    pub rejected: u64,
    /// Decisions made without a classifier probability
    pub ml_fallbacks: u64,
    pub avg_latency_ms: f64,
}

impl ScoringMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one decision and its processing time
    pub fn record(&self, result: &DecisionResult, elapsed: Duration) {
        self.decisions.fetch_add(1, Ordering::Relaxed);
        if result.is_fraud() {
            self.rejected.fetch_add(1, Ordering::Relaxed);
        } else {
            self.approved.fetch_add(1, Ordering::Relaxed);
        }
        if result.is_fallback() {
            self.ml_fallbacks.fetch_add(1, Ordering::Relaxed);
        }

        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.latency_sum_us.fetch_add(micros, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let decisions = self.decisions.load(Ordering::Relaxed);
        let latency_sum_us = self.latency_sum_us.load(Ordering::Relaxed);

        MetricsSnapshot {
            decisions,
            approved: self.approved.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            ml_fallbacks: self.ml_fallbacks.load(Ordering::Relaxed),
            avg_latency_ms: if decisions == 0 {
                0.0
            } else {
                latency_sum_us as f64 / decisions as f64 / 1000.0
            },
        }
    }
}
