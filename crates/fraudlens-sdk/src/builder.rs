//! Builder pattern for ScoringEngine

use crate::config::{load_policy_file, EngineConfig};
use crate::error::Result;
use crate::scoring_engine::ScoringEngine;
use fraudlens_core::ScoringConfig;
use fraudlens_runtime::{Classifier, ModelLoader, ResultSink, UnavailableClassifier};
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for ScoringEngine
///
/// # Example
///
/// ```rust,ignore
/// use fraudlens_sdk::ScoringEngineBuilder;
///
/// // From a model file and a policy file
/// let engine = ScoringEngineBuilder::new()
///     .with_model_path("elliptic_xgb_hybrid_model.json")
///     .with_policy_file("config/policy.yaml")
///     .build()
///     .await?;
///
/// // With a stub classifier (for testing)
/// let engine = ScoringEngineBuilder::new()
///     .with_classifier(Arc::new(FixedClassifier::new(0.2)))
///     .build()
///     .await?;
/// ```
pub struct ScoringEngineBuilder {
    config: EngineConfig,
    classifier: Option<Arc<dyn Classifier>>,
    result_sink: Option<Arc<dyn ResultSink>>,
    #[cfg(feature = "sqlx")]
    database: Option<DatabaseOptions>,
}

#[cfg(feature = "sqlx")]
struct DatabaseOptions {
    url: String,
    max_connections: u32,
    min_connections: u32,
}

impl ScoringEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            classifier: None,
            result_sink: None,
            #[cfg(feature = "sqlx")]
            database: None,
        }
    }

    /// Start from an existing engine configuration
    pub fn with_engine_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the initial scoring configuration
    pub fn with_config(mut self, scoring: ScoringConfig) -> Self {
        self.config.scoring = scoring;
        self
    }

    /// Use an already constructed classifier instead of loading a model file
    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Load the classifier from an XGBoost JSON model file
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.model_path = Some(path.into());
        self
    }

    /// Load the scoring configuration from a policy file, also used by reload
    pub fn with_policy_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.policy_file = Some(path.into());
        self
    }

    /// Send decision records to a sink
    pub fn with_result_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.result_sink = Some(sink);
        self
    }

    /// Enable decision result persistence to database
    #[cfg(feature = "sqlx")]
    pub fn with_database(
        mut self,
        url: impl Into<String>,
        max_connections: u32,
        min_connections: u32,
    ) -> Self {
        self.database = Some(DatabaseOptions {
            url: url.into(),
            max_connections,
            min_connections,
        });
        self
    }

    /// Enable metrics
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.config.enable_metrics = enable;
        self
    }

    /// Build the scoring engine
    ///
    /// A missing or unreadable model never fails the build; the engine then
    /// scores with rules only. An unreadable policy file does fail it.
    pub async fn build(self) -> Result<ScoringEngine> {
        let scoring = match &self.config.policy_file {
            Some(path) => load_policy_file(path)?,
            None => self.config.scoring.clone(),
        };

        let classifier = match (self.classifier, &self.config.model_path) {
            (Some(classifier), _) => classifier,
            (None, Some(path)) => ModelLoader::load_or_unavailable(path),
            (None, None) => {
                tracing::warn!("No model configured, scoring with rules only");
                Arc::new(UnavailableClassifier)
            }
        };

        #[cfg_attr(not(feature = "sqlx"), allow(unused_mut))]
        let mut result_sink = self.result_sink;

        #[cfg(feature = "sqlx")]
        {
            if result_sink.is_none() {
                if let Some(database) = &self.database {
                    result_sink = Self::connect_result_writer(database).await;
                }
            }
        }

        tracing::info!(
            model = %classifier.name(),
            model_loaded = classifier.is_loaded(),
            persistence = result_sink.is_some(),
            "Scoring engine built"
        );

        Ok(ScoringEngine::new(
            classifier,
            scoring,
            self.config.enable_metrics,
            result_sink,
            self.config.policy_file,
        ))
    }

    /// Connect to the database and start the background writer
    ///
    /// Persistence is optional; connection failures are logged and skipped.
    #[cfg(feature = "sqlx")]
    async fn connect_result_writer(database: &DatabaseOptions) -> Option<Arc<dyn ResultSink>> {
        use fraudlens_runtime::result::{connect, ensure_schema};
        use fraudlens_runtime::DecisionResultWriter;

        let pool = match connect(
            &database.url,
            database.max_connections,
            database.min_connections,
        )
        .await
        {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!(error = %e, "Database unavailable, decisions will not be persisted");
                return None;
            }
        };

        if let Err(e) = ensure_schema(&pool).await {
            tracing::warn!(error = %e, "Failed to prepare transactions table");
        }

        Some(Arc::new(DecisionResultWriter::new(pool)))
    }
}

impl Default for ScoringEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fraudlens_runtime::FixedClassifier;

    #[tokio::test]
    async fn test_builder_without_model() {
        let engine = ScoringEngineBuilder::new().build().await.unwrap();
        assert!(!engine.model_loaded());
        assert_eq!(engine.classifier().name(), "unavailable");
    }

    #[tokio::test]
    async fn test_builder_with_classifier_and_config() {
        let engine = ScoringEngineBuilder::new()
            .with_classifier(Arc::new(FixedClassifier::new(0.4)))
            .with_config(ScoringConfig::default().with_ml_threshold(0.3))
            .build()
            .await
            .unwrap();

        assert!(engine.model_loaded());
        assert_eq!(engine.config_snapshot().ml_threshold, 0.3);
    }

    #[tokio::test]
    async fn test_builder_missing_model_file_still_builds() {
        let engine = ScoringEngineBuilder::new()
            .with_model_path("/no/such/model.json")
            .build()
            .await
            .unwrap();
        assert!(!engine.model_loaded());
    }

    #[tokio::test]
    async fn test_builder_missing_policy_file_fails() {
        let result = ScoringEngineBuilder::new()
            .with_policy_file("/no/such/policy.yaml")
            .build()
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_options() {
        let builder = ScoringEngineBuilder::new()
            .with_model_path("model.json")
            .enable_metrics(false);

        assert_eq!(builder.config.model_path, Some(PathBuf::from("model.json")));
        assert!(!builder.config.enable_metrics);
    }
}
