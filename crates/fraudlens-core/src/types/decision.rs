//! Decision result types

use super::rule::RuleOutcomeSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status label derived from the final verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionStatus {
    Approved,
    Rejected,
}

impl DecisionStatus {
    /// Map a fraud verdict to its status label
    pub fn from_verdict(fraud: bool) -> Self {
        if fraud {
            DecisionStatus::Rejected
        } else {
            DecisionStatus::Approved
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DecisionStatus::Approved => "APPROVED",
            DecisionStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the probability in a decision came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbabilitySource {
    /// Returned by the classifier
    Model,
    /// Classifier unavailable or failed; probability forced to 0.0
    Fallback,
}

impl ProbabilitySource {
    pub fn as_str(self) -> &'static str {
        match self {
            ProbabilitySource::Model => "model",
            ProbabilitySource::Fallback => "fallback",
        }
    }
}

/// Final result of scoring one transaction
///
/// Built once per transaction and never modified; the status label is always
/// derived from the verdict, also when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DecisionResultFields")]
pub struct DecisionResult {
    probability: f64,
    rule_score: f64,
    fired_rules: RuleOutcomeSet,
    fraud: bool,
    status: DecisionStatus,
    probability_source: ProbabilitySource,
}

/// Serialized form of [`DecisionResult`] without the derived status
#[derive(Deserialize)]
struct DecisionResultFields {
    probability: f64,
    rule_score: f64,
    fired_rules: RuleOutcomeSet,
    fraud: bool,
    probability_source: ProbabilitySource,
}

impl From<DecisionResultFields> for DecisionResult {
    fn from(fields: DecisionResultFields) -> Self {
        DecisionResult::new(
            fields.probability,
            fields.rule_score,
            fields.fired_rules,
            fields.fraud,
            fields.probability_source,
        )
    }
}

impl DecisionResult {
    /// Create a decision result
    pub fn new(
        probability: f64,
        rule_score: f64,
        fired_rules: RuleOutcomeSet,
        fraud: bool,
        probability_source: ProbabilitySource,
    ) -> Self {
        Self {
            probability,
            rule_score,
            fired_rules,
            fraud,
            status: DecisionStatus::from_verdict(fraud),
            probability_source,
        }
    }

    /// Classifier probability in `[0, 1]` (0.0 on fallback)
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Weighted rule score
    pub fn rule_score(&self) -> f64 {
        self.rule_score
    }

    /// Per-rule outcomes
    pub fn fired_rules(&self) -> &RuleOutcomeSet {
        &self.fired_rules
    }

    /// Final fraud verdict
    pub fn is_fraud(&self) -> bool {
        self.fraud
    }

    pub fn status(&self) -> DecisionStatus {
        self.status
    }

    pub fn probability_source(&self) -> ProbabilitySource {
        self.probability_source
    }

    /// Whether the classifier was bypassed for this decision
    pub fn is_fallback(&self) -> bool {
        self.probability_source == ProbabilitySource::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::rule::RuleId;

    #[test]
    fn test_status_from_verdict() {
        assert_eq!(DecisionStatus::from_verdict(true), DecisionStatus::Rejected);
        assert_eq!(DecisionStatus::from_verdict(false), DecisionStatus::Approved);
        assert_eq!(DecisionStatus::Rejected.to_string(), "REJECTED");
    }

    #[test]
    fn test_decision_result_derives_status() {
        let mut fired = RuleOutcomeSet::new();
        fired.set(RuleId::R1, true);

        let result = DecisionResult::new(0.8, 15.0, fired, true, ProbabilitySource::Model);
        assert_eq!(result.status(), DecisionStatus::Rejected);
        assert!(result.is_fraud());
        assert!(!result.is_fallback());
        assert!(result.fired_rules().is_fired(RuleId::R1));
    }

    #[test]
    fn test_decision_result_serialization() {
        let result = DecisionResult::new(
            0.0,
            20.0,
            RuleOutcomeSet::new(),
            false,
            ProbabilitySource::Fallback,
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "APPROVED");
        assert_eq!(json["probability_source"], "fallback");
        assert_eq!(json["fired_rules"]["R7"], 0);
    }

    #[test]
    fn test_deserialized_status_follows_verdict() {
        let json = r#"{
            "probability": 0.9,
            "rule_score": 0.0,
            "fired_rules": {},
            "fraud": true,
            "status": "APPROVED",
            "probability_source": "model"
        }"#;

        let result: DecisionResult = serde_json::from_str(json).unwrap();
        assert!(result.is_fraud());
        assert_eq!(result.status(), DecisionStatus::Rejected);
    }

    #[test]
    fn test_deserialize_round_trip() {
        let mut fired = RuleOutcomeSet::new();
        fired.set(RuleId::R5, true);
        let result = DecisionResult::new(0.1, 15.0, fired, false, ProbabilitySource::Model);

        let json = serde_json::to_string(&result).unwrap();
        let parsed: DecisionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
