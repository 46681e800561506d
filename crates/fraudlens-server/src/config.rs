//! Server configuration
//!
//! Read from `config/server.{yaml,toml,json}` when present, overlaid by
//! `FRAUDLENS_*` environment variables (nested keys joined with `__`, e.g.
//! `FRAUDLENS_DATABASE__HOST`). A `.env` file is loaded first.

use config::{Config, Environment, File, Source};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Discrete database settings, used when no database URL is given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Database host; persistence is disabled when unset
    pub host: Option<String>,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: Option<String>,
    /// Pool size limits
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: None,
            port: 5432,
            name: "fraud_db".to_string(),
            user: "postgres".to_string(),
            password: None,
            max_connections: 10,
            min_connections: 1,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,

    /// `text` or `json`
    pub log_format: String,

    /// XGBoost JSON model file
    pub model_path: PathBuf,

    /// YAML policy file with the scoring configuration (optional)
    pub policy_file: Option<PathBuf>,

    /// Enable metrics
    pub enable_metrics: bool,

    /// Database URL for decision persistence (optional)
    /// Takes precedence over `database`
    pub database_url: Option<String>,

    pub database: DatabaseSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            model_path: PathBuf::from("elliptic_xgb_hybrid_model.json"),
            policy_file: None,
            enable_metrics: true,
            database_url: None,
            database: DatabaseSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, the optional config file and the environment
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_sources(
            File::with_name("config/server").required(false),
            Self::environment(),
        )
    }

    /// Load configuration from a specific file, overlaid by the environment
    pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Self::from_sources(File::from(path.as_ref()), Self::environment())
    }

    /// Environment source with the server's prefix and separators
    pub fn environment() -> Environment {
        Environment::with_prefix("FRAUDLENS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Merge a file source and an environment source
    pub fn from_sources<F>(file: F, env: Environment) -> anyhow::Result<Self>
    where
        F: Source + Send + Sync + 'static,
    {
        let config_result = Config::builder().add_source(file).add_source(env).build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(e) => Err(anyhow::anyhow!("Failed to read config: {}", e)),
        }
    }

    /// Postgres URL for persistence, if any is configured
    ///
    /// Uses `database_url`, then the discrete settings when a host is set,
    /// then `DATABASE_URL`.
    pub fn database_url(&self) -> Option<String> {
        if let Some(url) = &self.database_url {
            return Some(url.clone());
        }

        let db = &self.database;
        if let Some(host) = &db.host {
            let credentials = match &db.password {
                Some(password) => format!("{}:{}", db.user, password),
                None => db.user.clone(),
            };
            return Some(format!(
                "postgres://{}@{}:{}/{}",
                credentials, host, db.port, db.name
            ));
        }

        std::env::var("DATABASE_URL").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert!(config.enable_metrics);
        assert_eq!(config.log_level, "info");
        assert_eq!(
            config.model_path,
            PathBuf::from("elliptic_xgb_hybrid_model.json")
        );
        assert!(config.policy_file.is_none());
        assert!(config.database_url.is_none());
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 1);
    }

    #[test]
    fn test_explicit_database_url_wins() {
        let config = ServerConfig {
            database_url: Some("postgres://u@db/x".to_string()),
            database: DatabaseSettings {
                host: Some("other".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(config.database_url().as_deref(), Some("postgres://u@db/x"));
    }
}
