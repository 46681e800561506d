//! Rule identifiers and rule outcome sets

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Stable identifier of one of the seven heuristic rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleId {
    /// High value transaction
    R1,
    /// Zero fee
    R2,
    /// Early time step
    R3,
    /// Low-value structuring
    R4,
    /// Neighbour aggregation
    R5,
    /// High velocity
    R6,
    /// Structural anomaly
    R7,
}

impl RuleId {
    /// All rules in evaluation order
    pub const ALL: [RuleId; 7] = [
        RuleId::R1,
        RuleId::R2,
        RuleId::R3,
        RuleId::R4,
        RuleId::R5,
        RuleId::R6,
        RuleId::R7,
    ];

    /// Position of the rule in [`RuleId::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::R1 => "R1",
            RuleId::R2 => "R2",
            RuleId::R3 => "R3",
            RuleId::R4 => "R4",
            RuleId::R5 => "R5",
            RuleId::R6 => "R6",
            RuleId::R7 => "R7",
        }
    }

    /// Human-readable rule name
    pub fn name(self) -> &'static str {
        match self {
            RuleId::R1 => "High Value",
            RuleId::R2 => "Zero Fee",
            RuleId::R3 => "Early Step",
            RuleId::R4 => "Low-Value Structuring",
            RuleId::R5 => "Neighbor Aggregation",
            RuleId::R6 => "High Velocity",
            RuleId::R7 => "Structural Anomaly",
        }
    }

    /// Name of the derived classifier feature that carries this rule's flag
    pub fn fired_feature_name(self) -> &'static str {
        match self {
            RuleId::R1 => "R1_Fired",
            RuleId::R2 => "R2_Fired",
            RuleId::R3 => "R3_Fired",
            RuleId::R4 => "R4_Fired",
            RuleId::R5 => "R5_Fired",
            RuleId::R6 => "R6_Fired",
            RuleId::R7 => "R7_Fired",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownRule(s.to_string()))
    }
}

/// Outcome of evaluating every rule once for one transaction
///
/// Serialized as a map from rule id to `0` or `1`, e.g. `{"R1": 1, "R2": 0, ...}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<String, u8>", try_from = "BTreeMap<String, u8>")]
pub struct RuleOutcomeSet {
    fired: [bool; 7],
}

impl RuleOutcomeSet {
    /// Create an outcome set with no rule fired
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a rule
    pub fn set(&mut self, rule: RuleId, fired: bool) {
        self.fired[rule.index()] = fired;
    }

    /// Whether the rule fired
    pub fn is_fired(&self, rule: RuleId) -> bool {
        self.fired[rule.index()]
    }

    /// The rule's outcome as a `0`/`1` flag
    pub fn flag(&self, rule: RuleId) -> u8 {
        u8::from(self.is_fired(rule))
    }

    /// Iterate over every rule and its outcome, in rule order
    pub fn iter(&self) -> impl Iterator<Item = (RuleId, bool)> + '_ {
        RuleId::ALL.iter().map(move |&id| (id, self.is_fired(id)))
    }

    /// Rules that fired, in rule order
    pub fn fired_rules(&self) -> Vec<RuleId> {
        self.iter().filter(|(_, fired)| *fired).map(|(id, _)| id).collect()
    }

    /// Number of rules that fired
    pub fn fired_count(&self) -> usize {
        self.fired.iter().filter(|fired| **fired).count()
    }

    /// Outcome map keyed by rule id string
    pub fn to_map(&self) -> BTreeMap<String, u8> {
        self.iter()
            .map(|(id, fired)| (id.as_str().to_string(), u8::from(fired)))
            .collect()
    }
}

impl From<RuleOutcomeSet> for BTreeMap<String, u8> {
    fn from(outcomes: RuleOutcomeSet) -> Self {
        outcomes.to_map()
    }
}

impl TryFrom<BTreeMap<String, u8>> for RuleOutcomeSet {
    type Error = CoreError;

    fn try_from(map: BTreeMap<String, u8>) -> Result<Self, Self::Error> {
        let mut outcomes = RuleOutcomeSet::new();
        for (key, flag) in map {
            let rule: RuleId = key.parse()?;
            match flag {
                0 => outcomes.set(rule, false),
                1 => outcomes.set(rule, true),
                other => {
                    return Err(CoreError::InvalidValue(format!(
                        "rule flag for {} must be 0 or 1, got {}",
                        rule, other
                    )))
                }
            }
        }
        Ok(outcomes)
    }
}
