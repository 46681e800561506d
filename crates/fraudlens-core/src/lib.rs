//! FraudLens Core - Core types and definitions for the FraudLens decision engine
//!
//! This crate provides the fundamental types shared by every FraudLens crate:
//! - Transaction input and named feature keys with their per-key defaults
//! - Rule identifiers and rule outcome sets
//! - The immutable scoring configuration snapshot
//! - Decision results and status labels
//! - Error types

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{RuleThresholds, RuleToggles, RuleWeights, ScoringConfig};
pub use error::CoreError;
pub use types::{
    features, DecisionResult, DecisionStatus, FeatureKey, FeatureMap, ProbabilitySource, RuleId,
    RuleOutcomeSet, TransactionInput,
};
