//! Seven-rule evaluator
//!
//! Maps a transaction's features and time step to one outcome per rule and a
//! weighted score. Every rule is a pure predicate over the inputs and the
//! thresholds of the configuration snapshot it was built with:
//!
//! | Rule | Fires when |
//! |---|---|
//! | R1 High Value | `feat_3 > high_value` |
//! | R2 Zero Fee | `feat_4 <= zero_fee` |
//! | R3 Early Step | `time_step <= early_step` |
//! | R4 Low-Value Structuring | `feat_3 < low_value` and R1 did not fire |
//! | R5 Neighbor Aggregation | `feat_100 > aggregation` |
//! | R6 High Velocity | `feat_10 > velocity` |
//! | R7 Structural Anomaly | `feat_15 / (feat_20 + 1e-6) > structural` |
//!
//! Missing features take the defaults documented in
//! [`fraudlens_core::features`].

use fraudlens_core::features::{
    AMOUNT, FEE, NEIGHBOR_AGGREGATION, STRUCTURAL_DENOMINATOR, STRUCTURAL_NUMERATOR, VELOCITY,
};
use fraudlens_core::{FeatureMap, RuleId, RuleOutcomeSet, RuleWeights, ScoringConfig};
use serde::Serialize;

/// Added to the R7 denominator on every evaluation, not only when it is zero.
///
/// This shifts every ratio slightly downwards; models were trained with the
/// same bias, so it must stay.
pub const STRUCTURAL_EPSILON: f64 = 1e-6;

/// R7 ratio with the unconditional epsilon
pub fn structural_ratio(numerator: f64, denominator: f64) -> f64 {
    numerator / (denominator + STRUCTURAL_EPSILON)
}

/// Outcome of evaluating the rule set against one transaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuleEvaluation {
    /// Sum of the weights of the fired rules
    pub score: f64,

    /// Per-rule outcome
    pub fired: RuleOutcomeSet,
}

/// Contribution of one rule to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleContribution {
    pub rule: RuleId,
    pub fired: bool,
    pub weight: i32,
    pub contribution: i32,
}

impl RuleEvaluation {
    /// Per-rule breakdown of the score under the given weights
    pub fn contributions(&self, weights: &RuleWeights) -> Vec<RuleContribution> {
        self.fired
            .iter()
            .map(|(rule, fired)| {
                let weight = weights.weight(rule);
                RuleContribution {
                    rule,
                    fired,
                    weight,
                    contribution: if fired { weight } else { 0 },
                }
            })
            .collect()
    }
}

/// Evaluates the seven rules under one configuration snapshot
///
/// Holds only a shared reference to the configuration, so one evaluator can
/// be used from many threads at once.
#[derive(Debug, Clone, Copy)]
pub struct RuleEvaluator<'a> {
    config: &'a ScoringConfig,
}

impl<'a> RuleEvaluator<'a> {
    /// Create an evaluator bound to a configuration snapshot
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// Evaluate every rule once and compute the weighted score
    pub fn evaluate(&self, features: &FeatureMap, time_step: i64) -> RuleEvaluation {
        let thresholds = &self.config.thresholds;
        let enabled = &self.config.enabled;

        let amount = AMOUNT.read(features);
        let fee = FEE.read(features);
        let velocity = VELOCITY.read(features);
        let aggregation = NEIGHBOR_AGGREGATION.read(features);
        let ratio = structural_ratio(
            STRUCTURAL_NUMERATOR.read(features),
            STRUCTURAL_DENOMINATOR.read(features),
        );

        let mut fired = RuleOutcomeSet::new();
        let mut apply = |rule: RuleId, condition: bool| {
            fired.set(rule, enabled.is_enabled(rule) && condition);
        };

        apply(RuleId::R1, amount > thresholds.high_value);
        apply(RuleId::R2, fee <= thresholds.zero_fee);
        apply(RuleId::R3, time_step <= thresholds.early_step);
        apply(RuleId::R5, aggregation > thresholds.aggregation);
        apply(RuleId::R6, velocity > thresholds.velocity);
        apply(RuleId::R7, ratio > thresholds.structural);

        // R4 is defined against R1's reported outcome
        let r1_fired = fired.is_fired(RuleId::R1);
        fired.set(
            RuleId::R4,
            enabled.is_enabled(RuleId::R4) && amount < thresholds.low_value && !r1_fired,
        );

        let score = fired
            .iter()
            .filter(|(_, is_fired)| *is_fired)
            .map(|(rule, _)| f64::from(self.config.weights.weight(rule)))
            .sum();

        RuleEvaluation { score, fired }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(pairs: &[(&str, f64)]) -> FeatureMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_all_high_risk_signals() {
        let config = ScoringConfig::default();
        let input = features(&[
            ("feat_3", 80_000.0),
            ("feat_4", 0.0),
            ("feat_10", 15.0),
            ("feat_15", 4.0),
            ("feat_20", 1.0),
            ("feat_100", 1.4),
        ]);

        let evaluation = RuleEvaluator::new(&config).evaluate(&input, 2);

        let flags: Vec<u8> = RuleId::ALL.iter().map(|&r| evaluation.fired.flag(r)).collect();
        assert_eq!(flags, vec![1, 1, 1, 0, 1, 1, 1]);
        assert_eq!(evaluation.score, 60.0);
    }

    #[test]
    fn test_sparse_input_defaults() {
        let config = ScoringConfig::default();
        let input = features(&[("feat_20", 1.0)]);

        let evaluation = RuleEvaluator::new(&config).evaluate(&input, 10);

        assert_eq!(evaluation.fired.fired_rules(), vec![RuleId::R2, RuleId::R4]);
        assert_eq!(evaluation.score, 20.0);
    }

    #[test]
    fn test_empty_features_use_per_key_defaults() {
        let config = ScoringConfig::default();
        let evaluation = RuleEvaluator::new(&config).evaluate(&FeatureMap::new(), 10);

        // Zero fee fires when absent, amount-based R1 never does
        assert!(evaluation.fired.is_fired(RuleId::R2));
        assert!(!evaluation.fired.is_fired(RuleId::R1));
        // Denominator defaults to 1, numerator to 0
        assert!(!evaluation.fired.is_fired(RuleId::R7));
    }

    #[test]
    fn test_zero_fee_does_not_fire_below_negative_threshold() {
        let mut config = ScoringConfig::default();
        config.thresholds.zero_fee = -0.5;

        let evaluation = RuleEvaluator::new(&config).evaluate(&FeatureMap::new(), 10);
        assert!(!evaluation.fired.is_fired(RuleId::R2));
    }

    #[test]
    fn test_boundary_comparisons() {
        let config = ScoringConfig::default();
        let input = features(&[
            ("feat_3", 50_000.0),
            ("feat_4", 0.0),
            ("feat_10", 10.0),
            ("feat_100", 0.8),
        ]);

        let evaluation = RuleEvaluator::new(&config).evaluate(&input, 5);

        assert!(!evaluation.fired.is_fired(RuleId::R1));
        assert!(evaluation.fired.is_fired(RuleId::R2));
        assert!(evaluation.fired.is_fired(RuleId::R3));
        assert!(!evaluation.fired.is_fired(RuleId::R4));
        assert!(!evaluation.fired.is_fired(RuleId::R5));
        assert!(!evaluation.fired.is_fired(RuleId::R6));
    }

    #[test]
    fn test_low_value_structuring_excludes_high_value() {
        // An inverted configuration where both predicates hold
        let mut config = ScoringConfig::default();
        config.thresholds.high_value = 10.0;
        config.thresholds.low_value = 1_000.0;

        let input = features(&[("feat_3", 500.0)]);
        let evaluation = RuleEvaluator::new(&config).evaluate(&input, 10);

        assert!(evaluation.fired.is_fired(RuleId::R1));
        assert!(!evaluation.fired.is_fired(RuleId::R4));
    }

    #[test]
    fn test_disabled_high_value_lets_structuring_fire() {
        let mut config = ScoringConfig::default().with_rule_enabled(RuleId::R1, false);
        config.thresholds.high_value = 10.0;
        config.thresholds.low_value = 1_000.0;

        let input = features(&[("feat_3", 500.0)]);
        let evaluation = RuleEvaluator::new(&config).evaluate(&input, 10);

        assert!(!evaluation.fired.is_fired(RuleId::R1));
        assert!(evaluation.fired.is_fired(RuleId::R4));
    }

    #[test]
    fn test_disabled_rule_does_not_score() {
        let config = ScoringConfig::default().with_rule_enabled(RuleId::R2, false);
        let evaluation = RuleEvaluator::new(&config).evaluate(&FeatureMap::new(), 10);

        assert!(!evaluation.fired.is_fired(RuleId::R2));
        assert_eq!(evaluation.score, 10.0);
    }

    #[test]
    fn test_structural_epsilon_is_unconditional() {
        // 2.0000015 / 1.0 would exceed the threshold; with the epsilon it does not
        let ratio = structural_ratio(2.0000015, 1.0);
        assert!(ratio < 2.0);
        assert!((ratio - 1.9999995).abs() < 1e-9);

        let config = ScoringConfig::default();
        let input = features(&[("feat_15", 2.0000015), ("feat_20", 1.0)]);
        let evaluation = RuleEvaluator::new(&config).evaluate(&input, 10);
        assert!(!evaluation.fired.is_fired(RuleId::R7));
    }

    #[test]
    fn test_structural_ratio_with_zero_denominator() {
        let config = ScoringConfig::default();
        let input = features(&[("feat_15", 1.0), ("feat_20", 0.0)]);
        let evaluation = RuleEvaluator::new(&config).evaluate(&input, 10);

        assert!(evaluation.fired.is_fired(RuleId::R7));
    }

    #[test]
    fn test_contributions() {
        let config = ScoringConfig::default();
        let evaluation = RuleEvaluator::new(&config).evaluate(&FeatureMap::new(), 1);
        let contributions = evaluation.contributions(&config.weights);

        assert_eq!(contributions.len(), 7);
        let total: i32 = contributions.iter().map(|c| c.contribution).sum();
        assert_eq!(f64::from(total), evaluation.score);
        assert_eq!(contributions[2].rule, RuleId::R3);
        assert_eq!(contributions[2].contribution, 5);
        assert_eq!(contributions[0].contribution, 0);
    }
}
