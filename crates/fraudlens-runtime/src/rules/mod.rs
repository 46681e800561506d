//! Heuristic rule evaluation

mod evaluator;

pub use evaluator::{
    structural_ratio, RuleContribution, RuleEvaluation, RuleEvaluator, STRUCTURAL_EPSILON,
};
