//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use fraudlens_core::TransactionInput;
use fraudlens_runtime::{AlignedFeatureVector, Classifier, ModelError};
use std::sync::Mutex;

/// Transaction that trips six of the seven rules (score 60)
pub fn high_risk_transaction() -> TransactionInput {
    TransactionInput::new(1, "tx_high", 2)
        .with_feature("feat_3", 80_000.0)
        .with_feature("feat_4", 0.0)
        .with_feature("feat_10", 15.0)
        .with_feature("feat_15", 4.0)
        .with_feature("feat_20", 1.0)
        .with_feature("feat_100", 1.4)
}

/// Transaction that only trips R2 and R4 (score 20)
pub fn sparse_transaction() -> TransactionInput {
    TransactionInput::new(2, "tx_sparse", 10).with_feature("feat_20", 1.0)
}

/// Panics on every prediction
pub struct PanickingClassifier;

impl Classifier for PanickingClassifier {
    fn name(&self) -> &str {
        "panicking"
    }

    fn expected_feature_names(&self) -> Option<&[String]> {
        None
    }

    fn predict_proba(&self, _features: &AlignedFeatureVector) -> Result<f64, ModelError> {
        panic!("model exploded")
    }
}

/// Captures every vector it is asked to score
pub struct RecordingClassifier {
    names: Vec<String>,
    probability: f64,
    seen: Mutex<Vec<AlignedFeatureVector>>,
}

impl RecordingClassifier {
    pub fn new(names: &[&str], probability: f64) -> Self {
        Self {
            names: names.iter().map(|s| s.to_string()).collect(),
            probability,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<AlignedFeatureVector> {
        self.seen.lock().unwrap().clone()
    }
}

impl Classifier for RecordingClassifier {
    fn name(&self) -> &str {
        "recording"
    }

    fn expected_feature_names(&self) -> Option<&[String]> {
        Some(&self.names)
    }

    fn predict_proba(&self, features: &AlignedFeatureVector) -> Result<f64, ModelError> {
        self.seen.lock().unwrap().push(features.clone());
        Ok(self.probability)
    }
}
