//! Classifier capability
//!
//! The decision engine only needs three things from a classifier: an
//! optional list of expected feature names, a fraud probability for an
//! aligned vector, and whether it is loaded at all. Every failure mode is a
//! [`ModelError`] so the engine can fall back to rules-only scoring.

mod loader;
mod stub;
mod xgboost;

pub use loader::ModelLoader;
pub use stub::{FailingClassifier, FixedClassifier, UnavailableClassifier};
pub use xgboost::XgbClassifier;

use crate::features::AlignedFeatureVector;
use std::path::PathBuf;
use thiserror::Error;

/// Classifier error
#[derive(Error, Debug)]
pub enum ModelError {
    /// No model is loaded
    #[error("Model not loaded")]
    NotLoaded,

    /// Model file does not exist
    #[error("Model file not found: {0}")]
    NotFound(PathBuf),

    /// Model document could not be parsed
    #[error("Failed to parse model: {0}")]
    Parse(String),

    /// Objective has no probability transform
    #[error("Unsupported objective: {0}")]
    UnsupportedObjective(String),

    /// Model structure is not supported
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    /// Input vector does not match the model's feature count
    #[error("Feature shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Prediction is not a probability
    #[error("Invalid probability: {0}")]
    InvalidProbability(f64),

    /// Inference failed
    #[error("Inference failed: {0}")]
    Inference(String),

    /// I/O error while reading a model
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A fraud classifier
pub trait Classifier: Send + Sync {
    /// Short name used in logs and health reports
    fn name(&self) -> &str;

    /// Feature names in training order, when the model publishes them
    fn expected_feature_names(&self) -> Option<&[String]>;

    /// Probability of the positive (fraud) class
    fn predict_proba(&self, features: &AlignedFeatureVector) -> Result<f64, ModelError>;

    /// Whether the classifier can serve predictions
    fn is_loaded(&self) -> bool {
        true
    }
}

/// Reject values that are not finite or lie outside `[0, 1]`
pub fn validate_probability(probability: f64) -> Result<f64, ModelError> {
    if probability.is_finite() && (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        Err(ModelError::InvalidProbability(probability))
    }
}
