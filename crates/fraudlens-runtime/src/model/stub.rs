//! Classifiers that do not need a model file

use super::{validate_probability, Classifier, ModelError};
use crate::features::AlignedFeatureVector;

/// Returns the same probability for every input
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    probability: f64,
    feature_names: Option<Vec<String>>,
}

impl FixedClassifier {
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            feature_names: None,
        }
    }

    /// Publish an expected feature layout
    pub fn with_feature_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feature_names = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

impl Classifier for FixedClassifier {
    fn name(&self) -> &str {
        "fixed"
    }

    fn expected_feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict_proba(&self, features: &AlignedFeatureVector) -> Result<f64, ModelError> {
        if let Some(names) = &self.feature_names {
            if names.len() != features.len() {
                return Err(ModelError::ShapeMismatch {
                    expected: names.len(),
                    actual: features.len(),
                });
            }
        }
        validate_probability(self.probability)
    }
}

/// Fails every prediction with an inference error
#[derive(Debug, Clone)]
pub struct FailingClassifier {
    message: String,
}

impl FailingClassifier {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Classifier for FailingClassifier {
    fn name(&self) -> &str {
        "failing"
    }

    fn expected_feature_names(&self) -> Option<&[String]> {
        None
    }

    fn predict_proba(&self, _features: &AlignedFeatureVector) -> Result<f64, ModelError> {
        Err(ModelError::Inference(self.message.clone()))
    }
}

/// Stands in for a model that could not be loaded
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClassifier;

impl Classifier for UnavailableClassifier {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn expected_feature_names(&self) -> Option<&[String]> {
        None
    }

    fn predict_proba(&self, _features: &AlignedFeatureVector) -> Result<f64, ModelError> {
        Err(ModelError::NotLoaded)
    }

    fn is_loaded(&self) -> bool {
        false
    }
}
