//! Transaction input

use super::features::{FeatureKey, FeatureMap};
use serde::{Deserialize, Serialize};

/// A transaction submitted for scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Submitting user
    pub user_id: i64,

    /// Opaque transaction identifier
    pub tx_id: String,

    /// Discrete time step of the transaction
    pub time_step: i64,

    /// Named feature values
    #[serde(default)]
    pub features: FeatureMap,
}

impl TransactionInput {
    /// Create a transaction with no features
    pub fn new(user_id: i64, tx_id: impl Into<String>, time_step: i64) -> Self {
        Self {
            user_id,
            tx_id: tx_id.into(),
            time_step,
            features: FeatureMap::new(),
        }
    }

    /// Add a feature value
    pub fn with_feature(mut self, name: impl Into<String>, value: f64) -> Self {
        self.features.insert(name.into(), value);
        self
    }

    /// Replace all features
    pub fn with_features(mut self, features: FeatureMap) -> Self {
        self.features = features;
        self
    }

    /// Read a named feature, applying the key's default when absent
    pub fn feature(&self, key: &FeatureKey) -> f64 {
        key.read(&self.features)
    }
}
