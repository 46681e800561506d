//! Scoring configuration
//!
//! A [`ScoringConfig`] is an immutable snapshot of every tunable value the
//! decision engine reads: seven rule thresholds, seven integer weights, a
//! per-rule enable switch, and the two decision thresholds. The engine never
//! reads configuration from anywhere else, and a snapshot is not validated;
//! negative weights or inverted thresholds are applied exactly as given.
//!
//! Every field has a serde default, so partial policy files are accepted:
//!
//! ```yaml
//! ml_threshold: 0.6
//! weights:
//!   r1: 20
//! ```

use crate::types::RuleId;
use serde::{Deserialize, Serialize};

/// Rule thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleThresholds {
    /// R1 fires when the amount is strictly above this value
    pub high_value: f64,

    /// R2 fires when the fee is at or below this value
    pub zero_fee: f64,

    /// R3 fires when the time step is at or below this value
    pub early_step: i64,

    /// R4 fires when the amount is strictly below this value and R1 did not fire
    pub low_value: f64,

    /// R5 fires when neighbour aggregation is strictly above this value
    pub aggregation: f64,

    /// R6 fires when velocity is strictly above this value
    pub velocity: f64,

    /// R7 fires when the structural ratio is strictly above this value
    pub structural: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            high_value: 50_000.0,
            zero_fee: 0.0,
            early_step: 5,
            low_value: 50.0,
            aggregation: 0.8,
            velocity: 10.0,
            structural: 2.0,
        }
    }
}

/// Integer weight of each rule in the aggregate score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleWeights {
    pub r1: i32,
    pub r2: i32,
    pub r3: i32,
    pub r4: i32,
    pub r5: i32,
    pub r6: i32,
    pub r7: i32,
}

impl RuleWeights {
    /// Weight of a single rule
    pub fn weight(&self, rule: RuleId) -> i32 {
        match rule {
            RuleId::R1 => self.r1,
            RuleId::R2 => self.r2,
            RuleId::R3 => self.r3,
            RuleId::R4 => self.r4,
            RuleId::R5 => self.r5,
            RuleId::R6 => self.r6,
            RuleId::R7 => self.r7,
        }
    }

    /// Set the weight of a single rule
    pub fn set_weight(&mut self, rule: RuleId, weight: i32) {
        match rule {
            RuleId::R1 => self.r1 = weight,
            RuleId::R2 => self.r2 = weight,
            RuleId::R3 => self.r3 = weight,
            RuleId::R4 => self.r4 = weight,
            RuleId::R5 => self.r5 = weight,
            RuleId::R6 => self.r6 = weight,
            RuleId::R7 => self.r7 = weight,
        }
    }

    /// Sum of all seven weights, the upper bound of the rule score
    pub fn total(&self) -> i64 {
        RuleId::ALL.iter().map(|&id| i64::from(self.weight(id))).sum()
    }
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            r1: 15,
            r2: 10,
            r3: 5,
            r4: 10,
            r5: 15,
            r6: 5,
            r7: 10,
        }
    }
}

/// Per-rule enable switches; a disabled rule always reports not fired
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleToggles {
    pub r1: bool,
    pub r2: bool,
    pub r3: bool,
    pub r4: bool,
    pub r5: bool,
    pub r6: bool,
    pub r7: bool,
}

impl RuleToggles {
    pub fn is_enabled(&self, rule: RuleId) -> bool {
        match rule {
            RuleId::R1 => self.r1,
            RuleId::R2 => self.r2,
            RuleId::R3 => self.r3,
            RuleId::R4 => self.r4,
            RuleId::R5 => self.r5,
            RuleId::R6 => self.r6,
            RuleId::R7 => self.r7,
        }
    }

    pub fn set_enabled(&mut self, rule: RuleId, enabled: bool) {
        match rule {
            RuleId::R1 => self.r1 = enabled,
            RuleId::R2 => self.r2 = enabled,
            RuleId::R3 => self.r3 = enabled,
            RuleId::R4 => self.r4 = enabled,
            RuleId::R5 => self.r5 = enabled,
            RuleId::R6 => self.r6 = enabled,
            RuleId::R7 => self.r7 = enabled,
        }
    }
}

impl Default for RuleToggles {
    fn default() -> Self {
        Self {
            r1: true,
            r2: true,
            r3: true,
            r4: true,
            r5: true,
            r6: true,
            r7: true,
        }
    }
}

/// Complete scoring configuration snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Rule thresholds
    pub thresholds: RuleThresholds,

    /// Rule weights
    pub weights: RuleWeights,

    /// Rule enable switches
    pub enabled: RuleToggles,

    /// Classifier probability at or above which a transaction is rejected
    pub ml_threshold: f64,

    /// Rule score at or above which a transaction is rejected
    pub rule_threshold: f64,
}

impl ScoringConfig {
    /// Create the reference configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the classifier probability threshold
    pub fn with_ml_threshold(mut self, threshold: f64) -> Self {
        self.ml_threshold = threshold;
        self
    }

    /// Set the rule score threshold
    pub fn with_rule_threshold(mut self, threshold: f64) -> Self {
        self.rule_threshold = threshold;
        self
    }

    /// Replace the rule thresholds
    pub fn with_thresholds(mut self, thresholds: RuleThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Replace the rule weights
    pub fn with_weights(mut self, weights: RuleWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Enable or disable a single rule
    pub fn with_rule_enabled(mut self, rule: RuleId, enabled: bool) -> Self {
        self.enabled.set_enabled(rule, enabled);
        self
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            thresholds: RuleThresholds::default(),
            weights: RuleWeights::default(),
            enabled: RuleToggles::default(),
            ml_threshold: 0.5,
            rule_threshold: 40.0,
        }
    }
}
