//! Configuration types for ScoringEngine

use crate::error::Result;
use fraudlens_core::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Initial scoring configuration, replaced by the policy file when one is set
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// XGBoost JSON model file
    #[serde(default)]
    pub model_path: Option<PathBuf>,

    /// YAML policy file holding a scoring configuration
    #[serde(default)]
    pub policy_file: Option<PathBuf>,

    /// Enable metrics collection
    #[serde(default = "default_enable_metrics")]
    pub enable_metrics: bool,
}

fn default_enable_metrics() -> bool {
    true
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            model_path: None,
            policy_file: None,
            enable_metrics: true,
        }
    }

    /// Set the scoring configuration
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Set the model file
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Set the policy file
    pub fn with_policy_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.policy_file = Some(path.into());
        self
    }

    /// Enable metrics
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a scoring configuration from a YAML (or JSON) policy file
///
/// Fields missing from the file take their default values.
pub fn load_policy_file(path: impl AsRef<Path>) -> Result<ScoringConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let config: ScoringConfig = serde_yaml::from_str(&content)?;
    tracing::info!(path = %path.display(), "Loaded policy file");
    Ok(config)
}
