//! Aligns raw and derived features to the layout a classifier was trained on
//!
//! The working set is built from the raw feature map plus derived entries:
//! `time_step`, one `R<n>_Fired` flag per rule and `Total_Rule_Score`.
//! Derived entries overwrite raw entries of the same name. When the
//! classifier publishes its expected names, the output has exactly those
//! names in exactly that order, with absent names filled by
//! [`MISSING_FEATURE_VALUE`] and surplus names dropped. Without a published
//! list the working set is passed through in ascending name order.

use fraudlens_core::features::{TIME_STEP, TOTAL_RULE_SCORE};
use fraudlens_core::{FeatureMap, RuleOutcomeSet};
use serde::Serialize;
use std::collections::BTreeMap;

/// Value used for an expected feature with no counterpart in the working set
pub const MISSING_FEATURE_VALUE: f64 = 0.0;

/// Ordered feature vector ready for classifier inference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedFeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl AlignedFeatureVector {
    /// Build a vector from parallel name and value lists
    ///
    /// Returns `None` when the two lists differ in length.
    pub fn new(names: Vec<String>, values: Vec<f64>) -> Option<Self> {
        (names.len() == values.len()).then_some(Self { names, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of a named feature
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    /// Iterate over `(name, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Builds classifier input from raw features and rule outcomes
pub struct FeatureReconciler;

impl FeatureReconciler {
    /// Align one transaction's features
    ///
    /// `expected` is the classifier's published name list, if any. An empty
    /// published list yields an empty vector.
    pub fn align(
        raw: &FeatureMap,
        time_step: i64,
        fired: &RuleOutcomeSet,
        rule_score: f64,
        expected: Option<&[String]>,
    ) -> AlignedFeatureVector {
        let working = Self::working_set(raw, time_step, fired, rule_score);

        match expected {
            Some(names) => {
                let values = names
                    .iter()
                    .map(|name| {
                        working
                            .get(name.as_str())
                            .copied()
                            .unwrap_or(MISSING_FEATURE_VALUE)
                    })
                    .collect();
                AlignedFeatureVector {
                    names: names.to_vec(),
                    values,
                }
            }
            None => {
                let (names, values) = working
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value))
                    .unzip();
                AlignedFeatureVector { names, values }
            }
        }
    }

    fn working_set<'a>(
        raw: &'a FeatureMap,
        time_step: i64,
        fired: &RuleOutcomeSet,
        rule_score: f64,
    ) -> BTreeMap<&'a str, f64> {
        let mut working: BTreeMap<&str, f64> =
            raw.iter().map(|(name, value)| (name.as_str(), *value)).collect();

        working.insert(TIME_STEP, time_step as f64);
        for (rule, is_fired) in fired.iter() {
            working.insert(rule.fired_feature_name(), f64::from(u8::from(is_fired)));
        }
        working.insert(TOTAL_RULE_SCORE, rule_score);

        working
    }
}
