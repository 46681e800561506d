//! FraudLens HTTP Server
//!
//! Provides the REST API for scoring transactions.

use anyhow::Result;
use fraudlens_server::{api, config::ServerConfig, engine};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first, it decides the log format
    let config = ServerConfig::load()?;

    init_tracing(&config)?;
    info!(
        host = %config.host,
        port = config.port,
        model_path = %config.model_path.display(),
        policy_file = ?config.policy_file,
        "Loaded configuration"
    );

    let engine = engine::init_engine(&config).await?;
    info!(
        model = %engine.classifier().name(),
        model_loaded = engine.model_loaded(),
        "Scoring engine initialized"
    );

    let app = api::create_router(Arc::new(engine));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Scoring API: POST http://{}/transactions", addr);
    info!("  Metrics: http://{}/metrics", addr);
    info!("  Reload policy: POST http://{}/v1/policy/reload", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(config: &ServerConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "fraudlens_server={level},fraudlens_sdk={level},fraudlens_runtime={level},tower_http=debug",
            level = config.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}
