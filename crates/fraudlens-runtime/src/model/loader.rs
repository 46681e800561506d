//! Model loading

use super::{Classifier, ModelError, UnavailableClassifier, XgbClassifier};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Loads classifiers from model files
pub struct ModelLoader;

impl ModelLoader {
    /// Load an XGBoost JSON model
    pub fn load<P: AsRef<Path>>(path: P) -> Result<XgbClassifier, ModelError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading model");

        let model = XgbClassifier::from_path(path)?;

        info!(
            model = %model.name(),
            trees = model.num_trees(),
            features = model.num_features(),
            named_features = model.expected_feature_names().is_some(),
            "Model loaded successfully"
        );
        Ok(model)
    }

    /// Load a model, or return a classifier that always reports not loaded
    ///
    /// The service keeps running in rules-only mode when this returns the
    /// unavailable classifier.
    pub fn load_or_unavailable<P: AsRef<Path>>(path: P) -> Arc<dyn Classifier> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(model) => Arc::new(model),
            Err(ModelError::NotFound(missing)) => {
                warn!(
                    path = %missing.display(),
                    "Model file not found, scoring with rules only"
                );
                Arc::new(UnavailableClassifier)
            }
            Err(e) => {
                error!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load model, scoring with rules only"
                );
                Arc::new(UnavailableClassifier)
            }
        }
    }
}
