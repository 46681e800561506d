//! Integration tests for the scoring engine
//!
//! Covers the scoring sequence end to end: rule evaluation, alignment,
//! classifier fallback, the hybrid verdict, metrics, persistence and
//! configuration reload.

mod common;

use common::{high_risk_transaction, sparse_transaction, PanickingClassifier, RecordingClassifier};
use fraudlens_core::{DecisionStatus, ProbabilitySource, RuleId, ScoringConfig, TransactionInput};
use fraudlens_runtime::{FailingClassifier, FixedClassifier, InMemoryResultSink};
use fraudlens_sdk::{ScoringEngine, ScoringEngineBuilder};
use std::io::Write;
use std::sync::Arc;

async fn engine_with(probability: f64) -> ScoringEngine {
    ScoringEngineBuilder::new()
        .with_classifier(Arc::new(FixedClassifier::new(probability)))
        .build()
        .await
        .unwrap()
}

// ============================================================================
// Verdicts
// ============================================================================

#[tokio::test]
async fn test_rules_reject_regardless_of_probability() {
    let engine = engine_with(0.01).await;
    let result = engine.score_transaction(&high_risk_transaction());

    assert_eq!(result.rule_score(), 60.0);
    assert!(result.is_fraud());
    assert_eq!(result.status(), DecisionStatus::Rejected);
    assert_eq!(result.fired_rules().fired_count(), 6);
    assert!(!result.fired_rules().is_fired(RuleId::R4));
}

#[tokio::test]
async fn test_sparse_input_depends_on_probability() {
    let low = engine_with(0.49).await.score_transaction(&sparse_transaction());
    let high = engine_with(0.5).await.score_transaction(&sparse_transaction());

    assert_eq!(low.rule_score(), 20.0);
    assert!(!low.is_fraud());
    assert_eq!(low.status(), DecisionStatus::Approved);

    assert!(high.is_fraud());
    assert_eq!(high.probability(), 0.5);
}

// ============================================================================
// Classifier fallback
// ============================================================================

#[tokio::test]
async fn test_failing_classifier_falls_back_to_rules() {
    let engine = ScoringEngineBuilder::new()
        .with_classifier(Arc::new(FailingClassifier::new("shape mismatch")))
        .build()
        .await
        .unwrap();

    let sparse = engine.score_transaction(&sparse_transaction());
    assert_eq!(sparse.probability(), 0.0);
    assert_eq!(sparse.probability_source(), ProbabilitySource::Fallback);
    assert!(!sparse.is_fraud());

    let risky = engine.score_transaction(&high_risk_transaction());
    assert!(risky.is_fraud());
    assert!(risky.is_fallback());
}

#[tokio::test]
async fn test_unloaded_model_falls_back() {
    let engine = ScoringEngineBuilder::new()
        .with_model_path("/no/such/model.json")
        .build()
        .await
        .unwrap();

    let result = engine.score_transaction(&sparse_transaction());
    assert!(result.is_fallback());
    assert_eq!(result.probability(), 0.0);
}

#[tokio::test]
async fn test_panicking_classifier_falls_back() {
    let engine = ScoringEngineBuilder::new()
        .with_classifier(Arc::new(PanickingClassifier))
        .build()
        .await
        .unwrap();

    let result = engine.score_transaction(&high_risk_transaction());
    assert!(result.is_fallback());
    assert!(result.is_fraud());
}

#[tokio::test]
async fn test_out_of_range_probability_falls_back() {
    let result = engine_with(1.7).await.score_transaction(&sparse_transaction());
    assert!(result.is_fallback());
    assert_eq!(result.probability(), 0.0);
}

// ============================================================================
// Feature alignment
// ============================================================================

#[tokio::test]
async fn test_classifier_receives_aligned_vector() {
    let classifier = Arc::new(RecordingClassifier::new(
        &["feat_3", "time_step", "R1_Fired"],
        0.1,
    ));
    let engine = ScoringEngineBuilder::new()
        .with_classifier(classifier.clone())
        .build()
        .await
        .unwrap();

    let input = TransactionInput::new(5, "tx_d", 1).with_feature("feat_3", 10.0);
    engine.score_transaction(&input);

    let seen = classifier.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].values(), &[10.0, 1.0, 0.0]);
}

// ============================================================================
// Metrics and persistence
// ============================================================================

#[tokio::test]
async fn test_process_records_metrics_and_persists() {
    let sink = Arc::new(InMemoryResultSink::new());
    let engine = ScoringEngineBuilder::new()
        .with_classifier(Arc::new(FailingClassifier::new("offline")))
        .with_result_sink(sink.clone())
        .build()
        .await
        .unwrap();

    let rejected = engine.process(&high_risk_transaction());
    let approved = engine.process(&sparse_transaction());

    assert!(rejected.request_id.starts_with("req_"));
    assert_ne!(rejected.request_id, approved.request_id);
    assert_eq!(rejected.tx_id, "tx_high");

    let metrics = engine.metrics();
    assert_eq!(metrics.decisions, 2);
    assert_eq!(metrics.rejected, 1);
    assert_eq!(metrics.approved, 1);
    assert_eq!(metrics.ml_fallbacks, 2);

    let records = sink.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].request_id, rejected.request_id);
    assert!(records[0].final_decision);
    assert_eq!(records[0].status, DecisionStatus::Rejected);
    assert_eq!(records[1].total_rule_score, 20.0);
}

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test]
async fn test_update_config_applies_to_later_calls() {
    let engine = engine_with(0.1).await;
    assert!(!engine.score_transaction(&sparse_transaction()).is_fraud());

    engine.update_config(ScoringConfig::default().with_rule_threshold(20.0));
    assert!(engine.score_transaction(&sparse_transaction()).is_fraud());
}

#[tokio::test]
async fn test_disabled_rule_changes_score() {
    let engine = ScoringEngineBuilder::new()
        .with_classifier(Arc::new(FixedClassifier::new(0.0)))
        .with_config(ScoringConfig::default().with_rule_enabled(RuleId::R5, false))
        .build()
        .await
        .unwrap();

    let result = engine.score_transaction(&high_risk_transaction());
    assert_eq!(result.rule_score(), 45.0);
    assert!(!result.fired_rules().is_fired(RuleId::R5));
}

#[tokio::test]
async fn test_policy_file_load_and_reload() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "rule_threshold: 25").unwrap();

    let engine = ScoringEngineBuilder::new()
        .with_classifier(Arc::new(FixedClassifier::new(0.0)))
        .with_policy_file(file.path())
        .build()
        .await
        .unwrap();
    assert_eq!(engine.config_snapshot().rule_threshold, 25.0);

    std::fs::write(file.path(), "rule_threshold: 15\nml_threshold: 0.9\n").unwrap();
    let reloaded = engine.reload_policy().unwrap();

    assert_eq!(reloaded.rule_threshold, 15.0);
    assert_eq!(engine.config_snapshot().ml_threshold, 0.9);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_concurrent_scoring_is_consistent() {
    let engine = Arc::new(engine_with(0.2).await);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let input = if i % 2 == 0 {
                    high_risk_transaction()
                } else {
                    sparse_transaction()
                };
                (i, engine.process(&input).result.is_fraud())
            })
        })
        .collect();

    for handle in handles {
        let (i, fraud) = handle.join().unwrap();
        assert_eq!(fraud, i % 2 == 0);
    }
    assert_eq!(engine.metrics().decisions, 8);
}
