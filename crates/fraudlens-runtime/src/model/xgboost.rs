//! XGBoost JSON booster
//!
//! Evaluates gradient boosted trees saved with `Booster.save_model("*.json")`.
//! Only binary logistic models with numerical splits are accepted. A node
//! sends an input left when `x < split_condition` (compared in `f32`, as
//! XGBoost does) and a missing value (`NaN`) follows the node's default
//! direction. The probability is `sigmoid(logit(base_score) + sum(leaves))`.

use super::{validate_probability, Classifier, ModelError};
use crate::features::AlignedFeatureVector;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const LEAF: i32 = -1;

#[derive(Deserialize)]
struct ModelDocument {
    learner: LearnerDocument,
}

#[derive(Deserialize)]
struct LearnerDocument {
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: BoosterDocument,
    learner_model_param: LearnerParams,
    objective: ObjectiveDocument,
}

#[derive(Deserialize)]
struct BoosterDocument {
    name: String,
    #[serde(default)]
    model: Option<TreeEnsembleDocument>,
}

#[derive(Deserialize)]
struct TreeEnsembleDocument {
    trees: Vec<TreeDocument>,
    #[serde(default)]
    tree_info: Vec<i64>,
}

#[derive(Deserialize)]
struct TreeDocument {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<i64>,
    split_conditions: Vec<f32>,
    default_left: Flags,
    #[serde(default)]
    split_type: Vec<i64>,
}

/// Older writers emit booleans, newer ones emit `0`/`1`
#[derive(Deserialize)]
#[serde(untagged)]
enum Flags {
    Bools(Vec<bool>),
    Ints(Vec<i64>),
}

impl Flags {
    fn into_bools(self) -> Vec<bool> {
        match self {
            Flags::Bools(flags) => flags,
            Flags::Ints(flags) => flags.into_iter().map(|f| f != 0).collect(),
        }
    }
}

#[derive(Deserialize)]
struct LearnerParams {
    base_score: Value,
    #[serde(default)]
    num_class: Option<Value>,
    #[serde(default)]
    num_feature: Option<Value>,
}

#[derive(Deserialize)]
struct ObjectiveDocument {
    name: String,
}

/// Numeric learner parameter, written as a string (`"5E-1"`), a bracketed
/// vector string (`"[5E-1]"`) or a plain number
fn numeric_param(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .next()
            .and_then(|first| first.trim().parse().ok()),
        Value::Array(items) => items.first().and_then(numeric_param),
        _ => None,
    }
}

#[derive(Debug, Clone)]
struct RegressionTree {
    left: Vec<i32>,
    right: Vec<i32>,
    split_index: Vec<usize>,
    split_condition: Vec<f32>,
    default_left: Vec<bool>,
}

impl RegressionTree {
    fn from_document(doc: TreeDocument, position: usize) -> Result<Self, ModelError> {
        let num_nodes = doc.left_children.len();
        let default_left = doc.default_left.into_bools();
        let invalid = |reason: String| ModelError::Parse(format!("tree {}: {}", position, reason));

        if num_nodes == 0 {
            return Err(invalid("no nodes".to_string()));
        }
        if doc.right_children.len() != num_nodes
            || doc.split_indices.len() != num_nodes
            || doc.split_conditions.len() != num_nodes
            || default_left.len() != num_nodes
        {
            return Err(invalid("node arrays differ in length".to_string()));
        }
        if doc.split_type.iter().any(|&t| t != 0) {
            return Err(ModelError::UnsupportedModel(format!(
                "tree {} uses categorical splits",
                position
            )));
        }

        let mut split_index = Vec::with_capacity(num_nodes);
        for node in 0..num_nodes {
            let (left, right) = (doc.left_children[node], doc.right_children[node]);
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(invalid(format!("node {} has a single child", node)));
                }
                split_index.push(0);
                continue;
            }

            // Children always come after their parent, which rules out cycles
            for child in [left, right] {
                if child <= node as i32 || child as usize >= num_nodes {
                    return Err(invalid(format!(
                        "node {} has out-of-order child {}",
                        node, child
                    )));
                }
            }

            let index = usize::try_from(doc.split_indices[node])
                .map_err(|_| invalid(format!("node {} has a negative split index", node)))?;
            split_index.push(index);
        }

        Ok(Self {
            left: doc.left_children,
            right: doc.right_children,
            split_index,
            split_condition: doc.split_conditions,
            default_left,
        })
    }

    fn max_split_index(&self) -> Option<usize> {
        (0..self.left.len())
            .filter(|&node| self.left[node] != LEAF)
            .map(|node| self.split_index[node])
            .max()
    }

    fn leaf_value(&self, values: &[f64]) -> f64 {
        let mut node = 0usize;
        while self.left[node] != LEAF {
            let x = values[self.split_index[node]];
            let go_left = if x.is_nan() {
                self.default_left[node]
            } else {
                (x as f32) < self.split_condition[node]
            };
            node = if go_left {
                self.left[node] as usize
            } else {
                self.right[node] as usize
            };
        }
        f64::from(self.split_condition[node])
    }
}

/// Binary logistic XGBoost model
#[derive(Debug, Clone)]
pub struct XgbClassifier {
    name: String,
    feature_names: Option<Vec<String>>,
    num_feature: usize,
    base_margin: f64,
    trees: Vec<RegressionTree>,
}

impl XgbClassifier {
    /// Parse a model from its JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let document: ModelDocument =
            serde_json::from_str(json).map_err(|e| ModelError::Parse(e.to_string()))?;
        Self::from_document(document.learner)
    }

    /// Read and parse a model file; the classifier is named after the file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let json = std::fs::read_to_string(path)?;
        let mut model = Self::from_json_str(&json)?;
        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            model.name = file_name.to_string();
        }
        Ok(model)
    }

    /// Override the reported model name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of trees in the ensemble
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Number of input features the model was trained with
    pub fn num_features(&self) -> usize {
        self.num_feature
    }

    fn from_document(learner: LearnerDocument) -> Result<Self, ModelError> {
        let objective = learner.objective.name;
        if objective != "binary:logistic" && objective != "reg:logistic" {
            return Err(ModelError::UnsupportedObjective(objective));
        }

        if learner.gradient_booster.name != "gbtree" {
            return Err(ModelError::UnsupportedModel(format!(
                "booster {}",
                learner.gradient_booster.name
            )));
        }
        let ensemble = learner
            .gradient_booster
            .model
            .ok_or_else(|| ModelError::Parse("gbtree booster has no model".to_string()))?;

        let params = learner.learner_model_param;
        let num_class = params.num_class.as_ref().and_then(numeric_param).unwrap_or(0.0);
        if num_class > 1.0 || ensemble.tree_info.iter().any(|&group| group != 0) {
            return Err(ModelError::UnsupportedModel(
                "multi-class models are not supported".to_string(),
            ));
        }

        let base_score = numeric_param(&params.base_score)
            .ok_or_else(|| ModelError::Parse("base_score is not numeric".to_string()))?;
        if !(base_score > 0.0 && base_score < 1.0) {
            return Err(ModelError::Parse(format!(
                "base_score {} is not a probability",
                base_score
            )));
        }
        let base_margin = (base_score / (1.0 - base_score)).ln();

        let trees = ensemble
            .trees
            .into_iter()
            .enumerate()
            .map(|(position, doc)| RegressionTree::from_document(doc, position))
            .collect::<Result<Vec<_>, _>>()?;

        let feature_names = Some(learner.feature_names).filter(|names| !names.is_empty());
        let declared = params
            .num_feature
            .as_ref()
            .and_then(numeric_param)
            .map(|n| n as usize)
            .unwrap_or(0);
        let num_feature = match (&feature_names, declared) {
            (Some(names), 0) => names.len(),
            (Some(names), n) if names.len() != n => {
                return Err(ModelError::Parse(format!(
                    "{} feature names for {} features",
                    names.len(),
                    n
                )))
            }
            (_, n) => n,
        };

        let required = trees
            .iter()
            .filter_map(RegressionTree::max_split_index)
            .max()
            .map(|i| i + 1)
            .unwrap_or(0);
        let num_feature = num_feature.max(required);

        Ok(Self {
            name: "xgboost".to_string(),
            feature_names,
            num_feature,
            base_margin,
            trees,
        })
    }

    fn margin(&self, values: &[f64]) -> f64 {
        self.base_margin
            + self
                .trees
                .iter()
                .map(|tree| tree.leaf_value(values))
                .sum::<f64>()
    }
}

impl Classifier for XgbClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn expected_feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict_proba(&self, features: &AlignedFeatureVector) -> Result<f64, ModelError> {
        if features.len() != self.num_feature {
            return Err(ModelError::ShapeMismatch {
                expected: self.num_feature,
                actual: features.len(),
            });
        }

        let margin = self.margin(features.values());
        validate_probability(1.0 / (1.0 + (-margin).exp()))
    }
}
