//! Policy replay and classification quality

use super::SimulationRecord;
use crate::policy::HybridDecisionPolicy;
use crate::rules::RuleEvaluator;
use fraudlens_core::{RuleId, ScoringConfig};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts of predicted against actual outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub tp: u64,
    pub fp: u64,
    pub tn: u64,
    #[serde(rename = "fn")]
    pub fn_: u64,
}

impl ConfusionMatrix {
    fn add(&mut self, case: CaseKind) {
        match case {
            CaseKind::TruePositive => self.tp += 1,
            CaseKind::FalsePositive => self.fp += 1,
            CaseKind::TrueNegative => self.tn += 1,
            CaseKind::FalseNegative => self.fn_ += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.tp + self.fp + self.tn + self.fn_
    }

    /// `tp / (tp + fp)`, or 0.0 when nothing was rejected
    pub fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    /// `tp / (tp + fn)`, or 0.0 when there was no fraud
    pub fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_)
    }

    /// Harmonic mean of precision and recall, or 0.0 when both are zero
    pub fn f1(&self) -> f64 {
        ratio(2 * self.tp, 2 * self.tp + self.fp + self.fn_)
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Where a simulated decision lands in the confusion matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    TruePositive,
    FalsePositive,
    TrueNegative,
    FalseNegative,
}

impl CaseKind {
    pub fn classify(predicted: bool, actual: bool) -> Self {
        match (predicted, actual) {
            (true, true) => CaseKind::TruePositive,
            (true, false) => CaseKind::FalsePositive,
            (false, false) => CaseKind::TrueNegative,
            (false, true) => CaseKind::FalseNegative,
        }
    }
}

/// Outcome of replaying one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatedDecision {
    /// Position of the record in the input
    pub index: usize,
    pub rule_score: f64,
    pub model_confidence: f64,
    pub fired_rules: Vec<RuleId>,
    pub predicted: bool,
    pub actual: bool,
    pub case: CaseKind,
}

/// Aggregate result of a replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub total: u64,
    pub rejected: u64,
    pub matrix: ConfusionMatrix,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// How often each rule fired
    pub rule_fire_counts: BTreeMap<RuleId, u64>,
}

/// Replays a configuration over labelled records
///
/// Rules are re-evaluated under the candidate configuration; the classifier
/// is not called again, the stored confidence stands in for it.
#[derive(Debug, Clone, Copy)]
pub struct PolicySimulator<'a> {
    config: &'a ScoringConfig,
}

impl<'a> PolicySimulator<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// Per-record outcomes, in input order
    pub fn decisions(&self, records: &[SimulationRecord]) -> Vec<SimulatedDecision> {
        let evaluator = RuleEvaluator::new(self.config);
        let policy = HybridDecisionPolicy::from_config(self.config);

        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let evaluation = evaluator.evaluate(&record.features, record.time_step);
                let predicted = policy.decide(record.model_confidence, evaluation.score);
                SimulatedDecision {
                    index,
                    rule_score: evaluation.score,
                    model_confidence: record.model_confidence,
                    fired_rules: evaluation.fired.fired_rules(),
                    predicted,
                    actual: record.label,
                    case: CaseKind::classify(predicted, record.label),
                }
            })
            .collect()
    }

    /// Replay every record and summarise
    pub fn run(&self, records: &[SimulationRecord]) -> SimulationReport {
        let mut matrix = ConfusionMatrix::default();
        let mut rule_fire_counts: BTreeMap<RuleId, u64> =
            RuleId::ALL.iter().map(|&rule| (rule, 0)).collect();

        for decision in self.decisions(records) {
            matrix.add(decision.case);
            for rule in decision.fired_rules {
                *rule_fire_counts.entry(rule).or_insert(0) += 1;
            }
        }

        SimulationReport {
            total: matrix.total(),
            rejected: matrix.tp + matrix.fp,
            precision: matrix.precision(),
            recall: matrix.recall(),
            f1: matrix.f1(),
            matrix,
            rule_fire_counts,
        }
    }
}
