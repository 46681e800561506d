//! Core data model

pub mod decision;
pub mod features;
pub mod rule;
pub mod transaction;

pub use decision::{DecisionResult, DecisionStatus, ProbabilitySource};
pub use features::{FeatureKey, FeatureMap};
pub use rule::{RuleId, RuleOutcomeSet};
pub use transaction::TransactionInput;
