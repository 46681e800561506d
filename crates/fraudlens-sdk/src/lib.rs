//! FraudLens SDK
//!
//! High-level API for building a scoring engine and scoring transactions.

pub mod builder;
pub mod config;
pub mod error;
pub mod scoring_engine;

// Re-export main types
pub use builder::ScoringEngineBuilder;
pub use config::{load_policy_file, EngineConfig};
pub use error::{Result, SdkError};
pub use scoring_engine::{ScoringEngine, ScoringResponse};

// Re-export commonly used types from dependencies
pub use fraudlens_core::{
    DecisionResult, DecisionStatus, ProbabilitySource, RuleId, ScoringConfig, TransactionInput,
};
pub use fraudlens_runtime::{Classifier, MetricsSnapshot, ResultSink};
