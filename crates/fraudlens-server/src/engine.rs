//! Scoring engine initialization
//!
//! Converts server configuration into SDK builder calls.

use crate::config::ServerConfig;
use anyhow::Result;
use fraudlens_sdk::{ScoringEngine, ScoringEngineBuilder};
use tracing::info;

/// Initialize the scoring engine
///
/// The model is optional at runtime: a missing or unreadable model file
/// leaves the engine in rules-only mode rather than failing startup.
pub async fn init_engine(config: &ServerConfig) -> Result<ScoringEngine> {
    let mut builder = ScoringEngineBuilder::new()
        .with_model_path(config.model_path.clone())
        .enable_metrics(config.enable_metrics);

    if let Some(policy_file) = &config.policy_file {
        builder = builder.with_policy_file(policy_file.clone());
        info!(path = %policy_file.display(), "Policy file configured");
    }

    #[cfg(feature = "sqlx")]
    {
        if let Some(database_url) = config.database_url() {
            builder = builder.with_database(
                database_url,
                config.database.max_connections,
                config.database.min_connections,
            );
            info!("Database configured for decision persistence");
        } else {
            tracing::warn!("Database not configured, decision persistence is disabled");
        }
    }

    let engine = builder.build().await?;
    Ok(engine)
}
