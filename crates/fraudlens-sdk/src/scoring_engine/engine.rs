//! Core ScoringEngine implementation
//!
//! Scoring runs the rule evaluator, aligns features to the classifier's
//! layout, asks the classifier for a probability and applies the hybrid
//! policy. A classifier failure of any kind (missing model, shape mismatch,
//! invalid output, panic) is logged and replaced by a probability of 0.0, so
//! the decision degrades to rules only and scoring itself never fails.
//!
//! The scoring configuration is held as an `Arc` snapshot. Each call takes
//! one snapshot up front and uses it throughout, so a concurrent update only
//! affects later calls.

use super::types::ScoringResponse;
use crate::config::load_policy_file;
use crate::error::{Result, SdkError};
use fraudlens_core::{DecisionResult, ProbabilitySource, ScoringConfig, TransactionInput};
use fraudlens_runtime::model::validate_probability;
use fraudlens_runtime::{
    AlignedFeatureVector, Classifier, DecisionRecord, FeatureReconciler, HybridDecisionPolicy,
    MetricsSnapshot, ModelError, ResultSink, RuleEvaluator, ScoringMetrics,
};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

static REQUEST_SEQUENCE: AtomicU64 = AtomicU64::new(0);

pub struct ScoringEngine {
    /// Fraud classifier, read-only after load
    classifier: Arc<dyn Classifier>,

    /// Current configuration snapshot
    config: RwLock<Arc<ScoringConfig>>,

    /// Scoring counters
    metrics: Arc<ScoringMetrics>,

    metrics_enabled: bool,

    /// Optional destination for decision records
    result_sink: Option<Arc<dyn ResultSink>>,

    /// Policy file used by reload
    policy_file: Option<PathBuf>,
}

impl ScoringEngine {
    /// Generate a unique request ID
    /// Format: req_YYYYMMDDHHmmss_<8 hex random><8 hex sequence>
    /// Example: req_20231209143052_a3f2e1c40000002a
    ///
    /// The sequence is process-wide, so ids never repeat within a process
    /// until it wraps after 2^32 requests; the random half separates processes.
    fn generate_request_id() -> String {
        use chrono::Utc;
        use rand::Rng;

        let datetime_str = Utc::now().format("%Y%m%d%H%M%S").to_string();
        let random: u32 = rand::thread_rng().gen();
        let sequence = REQUEST_SEQUENCE.fetch_add(1, Ordering::Relaxed) as u32;

        format!("req_{}_{:08x}{:08x}", datetime_str, random, sequence)
    }

    pub(crate) fn new(
        classifier: Arc<dyn Classifier>,
        config: ScoringConfig,
        metrics_enabled: bool,
        result_sink: Option<Arc<dyn ResultSink>>,
        policy_file: Option<PathBuf>,
    ) -> Self {
        Self {
            classifier,
            config: RwLock::new(Arc::new(config)),
            metrics: Arc::new(ScoringMetrics::new()),
            metrics_enabled,
            result_sink,
            policy_file,
        }
    }

    /// Score a transaction under the current configuration
    pub fn score_transaction(&self, input: &TransactionInput) -> DecisionResult {
        let config = self.config_snapshot();
        self.score_with_config(input, &config)
    }

    /// Score a transaction under an explicit configuration snapshot
    pub fn score_with_config(
        &self,
        input: &TransactionInput,
        config: &ScoringConfig,
    ) -> DecisionResult {
        let evaluation = RuleEvaluator::new(config).evaluate(&input.features, input.time_step);

        let aligned = FeatureReconciler::align(
            &input.features,
            input.time_step,
            &evaluation.fired,
            evaluation.score,
            self.classifier.expected_feature_names(),
        );

        let (probability, source) = match self.predict(&aligned) {
            Ok(probability) => (probability, ProbabilitySource::Model),
            Err(cause) => {
                tracing::warn!(
                    tx_id = %input.tx_id,
                    classifier = %self.classifier.name(),
                    error = %cause,
                    "Classifier unavailable, scoring with rules only"
                );
                (0.0, ProbabilitySource::Fallback)
            }
        };

        let fraud = HybridDecisionPolicy::from_config(config).decide(probability, evaluation.score);
        let result = DecisionResult::new(
            probability,
            evaluation.score,
            evaluation.fired,
            fraud,
            source,
        );

        tracing::info!(
            tx_id = %input.tx_id,
            probability = probability,
            rule_score = evaluation.score,
            status = %result.status(),
            "Decision made"
        );

        result
    }

    /// Score a transaction, record metrics and hand the record to the sink
    pub fn process(&self, input: &TransactionInput) -> ScoringResponse {
        let start = Instant::now();
        let request_id = Self::generate_request_id();

        let result = self.score_transaction(input);

        let elapsed = start.elapsed();
        let processing_time_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

        if self.metrics_enabled {
            self.metrics.record(&result, elapsed);
        }

        if let Some(sink) = &self.result_sink {
            let record =
                DecisionRecord::from_decision(&request_id, input, &result, processing_time_ms);
            if let Err(e) = sink.record(record) {
                tracing::error!(
                    request_id = %request_id,
                    error = %e,
                    "Failed to queue decision record"
                );
            }
        }

        ScoringResponse {
            request_id,
            tx_id: input.tx_id.clone(),
            user_id: input.user_id,
            result,
            processing_time_ms,
        }
    }

    /// Current configuration snapshot
    pub fn config_snapshot(&self) -> Arc<ScoringConfig> {
        match self.config.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Replace the configuration; calls already in progress keep their snapshot
    pub fn update_config(&self, config: ScoringConfig) {
        let snapshot = Arc::new(config);
        match self.config.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
        tracing::info!("Scoring configuration updated");
    }

    /// Re-read the policy file and apply it
    pub fn reload_policy(&self) -> Result<Arc<ScoringConfig>> {
        let path = self.policy_file.as_ref().ok_or(SdkError::NoPolicyFile)?;
        let config = load_policy_file(path)?;
        self.update_config(config);
        Ok(self.config_snapshot())
    }

    /// Policy file used by [`ScoringEngine::reload_policy`]
    pub fn policy_file(&self) -> Option<&PathBuf> {
        self.policy_file.as_ref()
    }

    pub fn classifier(&self) -> &Arc<dyn Classifier> {
        &self.classifier
    }

    pub fn model_loaded(&self) -> bool {
        self.classifier.is_loaded()
    }

    /// Snapshot of the scoring counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn predict(&self, aligned: &AlignedFeatureVector) -> std::result::Result<f64, ModelError> {
        let outcome = catch_unwind(AssertUnwindSafe(|| self.classifier.predict_proba(aligned)))
            .map_err(|_| ModelError::Inference("classifier panicked".to_string()))?;
        validate_probability(outcome?)
    }
}
