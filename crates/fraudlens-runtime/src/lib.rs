//! FraudLens Runtime - Hybrid decision runtime
//!
//! This crate provides the stateless pieces of the hybrid decision engine and
//! the collaborators around them:
//! - `rules`: the seven-rule heuristic evaluator
//! - `features`: alignment of raw and derived features to the classifier's layout
//! - `policy`: the OR-of-thresholds decision policy
//! - `model`: the classifier capability and the XGBoost JSON booster
//! - `result`: decision records and persistence sinks
//! - `observability`: scoring counters
//! - `simulation`: replay of a policy over labelled transactions

pub mod error;
pub mod features;
pub mod model;
pub mod observability;
pub mod policy;
pub mod result;
pub mod rules;
pub mod simulation;

// Re-export main types
pub use error::{Result, RuntimeError};
pub use features::{AlignedFeatureVector, FeatureReconciler, MISSING_FEATURE_VALUE};
pub use model::{
    Classifier, FailingClassifier, FixedClassifier, ModelError, ModelLoader,
    UnavailableClassifier, XgbClassifier,
};
pub use observability::{MetricsSnapshot, ScoringMetrics};
pub use policy::{decide, HybridDecisionPolicy};
pub use result::{DecisionRecord, InMemoryResultSink, ResultSink};
#[cfg(feature = "sqlx")]
pub use result::DecisionResultWriter;
pub use rules::{RuleContribution, RuleEvaluation, RuleEvaluator, STRUCTURAL_EPSILON};
pub use simulation::{
    CaseKind, ConfusionMatrix, PolicySimulator, SimulatedDecision, SimulationDataset,
    SimulationRecord, SimulationReport,
};
