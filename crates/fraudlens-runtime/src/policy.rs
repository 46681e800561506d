//! Hybrid decision policy
//!
//! A transaction is fraudulent when either signal reaches its threshold.
//! Both comparisons are inclusive.

use fraudlens_core::ScoringConfig;

/// Combine the classifier probability and the rule score into a verdict
pub fn decide(probability: f64, rule_score: f64, ml_threshold: f64, rule_threshold: f64) -> bool {
    probability >= ml_threshold || rule_score >= rule_threshold
}

/// Decision thresholds captured from a configuration snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridDecisionPolicy {
    pub ml_threshold: f64,
    pub rule_threshold: f64,
}

impl HybridDecisionPolicy {
    pub fn new(ml_threshold: f64, rule_threshold: f64) -> Self {
        Self {
            ml_threshold,
            rule_threshold,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.ml_threshold, config.rule_threshold)
    }

    pub fn decide(&self, probability: f64, rule_score: f64) -> bool {
        decide(probability, rule_score, self.ml_threshold, self.rule_threshold)
    }
}

impl Default for HybridDecisionPolicy {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_inclusive() {
        assert!(decide(0.5, 0.0, 0.5, 40.0));
        assert!(decide(0.0, 40.0, 0.5, 40.0));
        assert!(!decide(0.4999, 39.0, 0.5, 40.0));
    }

    #[test]
    fn test_either_signal_rejects() {
        let policy = HybridDecisionPolicy::default();

        assert!(policy.decide(0.9, 0.0));
        assert!(policy.decide(0.1, 60.0));
        assert!(!policy.decide(0.1, 20.0));
    }

    #[test]
    fn test_from_config() {
        let config = ScoringConfig::new()
            .with_ml_threshold(0.8)
            .with_rule_threshold(25.0);
        let policy = HybridDecisionPolicy::from_config(&config);

        assert!(!policy.decide(0.7, 20.0));
        assert!(policy.decide(0.7, 25.0));
    }
}
