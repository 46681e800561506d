//! Named feature keys and their defaults
//!
//! Transactions carry a dynamic map of anonymised feature values. The rules
//! read a handful of them by name, and a key that is absent from the map is
//! replaced by the default recorded on its [`FeatureKey`]. The defaults are not
//! uniform and they decide rule behaviour for sparse inputs:
//!
//! | Key | Default | Effect when absent |
//! |---|---|---|
//! | `feat_3` (amount) | 0.0 | R1 never fires, R4 fires for a positive low-value threshold |
//! | `feat_4` (fee) | 0.0 | R2 fires unless the zero-fee threshold is negative |
//! | `feat_10` (velocity) | 0.0 | R6 never fires for a non-negative threshold |
//! | `feat_15` (structural numerator) | 0.0 | R7 never fires for a non-negative threshold |
//! | `feat_20` (structural denominator) | 1.0 | keeps the R7 ratio finite |
//! | `feat_100` (neighbour aggregation) | 0.0 | R5 never fires for a non-negative threshold |

use std::collections::HashMap;

/// Raw feature values keyed by name (e.g. `"feat_3"`)
pub type FeatureMap = HashMap<String, f64>;

/// A named feature together with the value used when it is missing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureKey {
    /// Feature name as it appears in the input map
    pub name: &'static str,

    /// Value substituted when the name is absent
    pub default: f64,
}

impl FeatureKey {
    /// Create a new feature key
    pub const fn new(name: &'static str, default: f64) -> Self {
        Self { name, default }
    }

    /// Read this feature from a map, falling back to the key's default
    pub fn read(&self, features: &FeatureMap) -> f64 {
        features.get(self.name).copied().unwrap_or(self.default)
    }
}

/// Transaction amount, used by R1 and R4
pub const AMOUNT: FeatureKey = FeatureKey::new("feat_3", 0.0);

/// Transaction fee, used by R2
pub const FEE: FeatureKey = FeatureKey::new("feat_4", 0.0);

/// Movement velocity, used by R6
pub const VELOCITY: FeatureKey = FeatureKey::new("feat_10", 0.0);

/// Numerator of the R7 structural ratio
pub const STRUCTURAL_NUMERATOR: FeatureKey = FeatureKey::new("feat_15", 0.0);

/// Denominator of the R7 structural ratio
pub const STRUCTURAL_DENOMINATOR: FeatureKey = FeatureKey::new("feat_20", 1.0);

/// Neighbour aggregation, used by R5
pub const NEIGHBOR_AGGREGATION: FeatureKey = FeatureKey::new("feat_100", 0.0);

/// Every feature read by the rule set
pub const RULE_INPUTS: [FeatureKey; 6] = [
    AMOUNT,
    FEE,
    VELOCITY,
    STRUCTURAL_NUMERATOR,
    STRUCTURAL_DENOMINATOR,
    NEIGHBOR_AGGREGATION,
];

/// Derived feature carrying the transaction time step
pub const TIME_STEP: &str = "time_step";

/// Derived feature carrying the weighted rule score
pub const TOTAL_RULE_SCORE: &str = "Total_Rule_Score";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_present_feature() {
        let mut features = FeatureMap::new();
        features.insert("feat_3".to_string(), 120.5);

        assert_eq!(AMOUNT.read(&features), 120.5);
    }

    #[test]
    fn test_read_missing_feature_uses_default() {
        let features = FeatureMap::new();

        assert_eq!(AMOUNT.read(&features), 0.0);
        assert_eq!(FEE.read(&features), 0.0);
        assert_eq!(STRUCTURAL_DENOMINATOR.read(&features), 1.0);
    }

    #[test]
    fn test_explicit_zero_denominator_is_not_replaced() {
        let mut features = FeatureMap::new();
        features.insert("feat_20".to_string(), 0.0);

        assert_eq!(STRUCTURAL_DENOMINATOR.read(&features), 0.0);
    }

    #[test]
    fn test_rule_inputs_are_unique() {
        let mut names: Vec<_> = RULE_INPUTS.iter().map(|k| k.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULE_INPUTS.len());
    }
}
