//! Decision result persistence
//!
//! Every scored transaction can be written to the `transactions` table for
//! review and historical analysis. Writes are queued on a channel and applied
//! by a background task, so scoring never waits on the database.

use chrono::{DateTime, Utc};
use fraudlens_core::{
    DecisionResult, DecisionStatus, FeatureMap, ProbabilitySource, RuleOutcomeSet,
    TransactionInput,
};
use crate::error::{Result, RuntimeError};
use serde::Serialize;

/// One persisted decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRecord {
    /// Request ID (unique identifier)
    pub request_id: String,

    pub user_id: i64,

    pub tx_id: String,

    pub time_step: i64,

    /// Raw features as received
    pub features: FeatureMap,

    pub ml_probability: f64,

    pub rule_score: f64,

    /// Same value as `rule_score`, kept as its own column for reporting
    pub total_rule_score: f64,

    pub fired_rules: RuleOutcomeSet,

    /// Final fraud verdict
    pub final_decision: bool,

    pub status: DecisionStatus,

    pub probability_source: ProbabilitySource,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    pub created_at: DateTime<Utc>,
}

impl DecisionRecord {
    /// Create a record from a scored transaction
    pub fn from_decision(
        request_id: impl Into<String>,
        input: &TransactionInput,
        result: &DecisionResult,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            user_id: input.user_id,
            tx_id: input.tx_id.clone(),
            time_step: input.time_step,
            features: input.features.clone(),
            ml_probability: result.probability(),
            rule_score: result.rule_score(),
            total_rule_score: result.rule_score(),
            fired_rules: *result.fired_rules(),
            final_decision: result.is_fraud(),
            status: result.status(),
            probability_source: result.probability_source(),
            processing_time_ms,
            created_at: Utc::now(),
        }
    }
}

/// Fail when an insert stored nothing
///
/// `request_id` is unique, so a conflicting insert affects zero rows.
#[cfg_attr(not(feature = "sqlx"), allow(dead_code))]
pub(crate) fn ensure_inserted(rows_affected: u64, request_id: &str) -> Result<()> {
    if rows_affected == 0 {
        return Err(RuntimeError::Persistence(format!(
            "duplicate request_id {}, record not stored",
            request_id
        )));
    }
    Ok(())
}

#[cfg(feature = "sqlx")]
pub use writer::{connect, ensure_schema, DecisionResultWriter};

#[cfg(feature = "sqlx")]
mod writer {
    use super::{ensure_inserted, DecisionRecord};
    use crate::error::{Result, RuntimeError};
    use crate::result::ResultSink;
    use sqlx::postgres::PgPoolOptions;
    use sqlx::PgPool;
    use tokio::sync::mpsc;

    const CREATE_TRANSACTIONS_TABLE: &str = r#"
        CREATE TABLE IF NOT EXISTS transactions (
            id SERIAL PRIMARY KEY,
            request_id TEXT UNIQUE NOT NULL,
            user_id BIGINT NOT NULL,
            tx_id TEXT NOT NULL,
            time_step BIGINT NOT NULL,
            features JSONB NOT NULL,
            ml_probability DOUBLE PRECISION NOT NULL,
            rule_score DOUBLE PRECISION NOT NULL,
            total_rule_score DOUBLE PRECISION NOT NULL,
            fired_rules JSONB NOT NULL,
            final_decision BOOLEAN NOT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'PENDING',
            probability_source VARCHAR(20) NOT NULL,
            processing_time_ms BIGINT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
    "#;

    /// Open a Postgres connection pool
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<PgPool> {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .connect(database_url)
            .await
            .map_err(|e| RuntimeError::Persistence(format!("Failed to connect: {}", e)))
    }

    /// Create the `transactions` table when it does not exist
    pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
        sqlx::query(CREATE_TRANSACTIONS_TABLE)
            .execute(pool)
            .await
            .map_err(|e| RuntimeError::Persistence(format!("Failed to create schema: {}", e)))?;
        tracing::info!("transactions table is ready");
        Ok(())
    }

    /// Queued writer for decision records
    pub struct DecisionResultWriter {
        sender: mpsc::UnboundedSender<DecisionRecord>,
    }

    impl DecisionResultWriter {
        /// Create a writer and spawn its background task
        ///
        /// Must be called from within a Tokio runtime.
        pub fn new(pool: PgPool) -> Self {
            let (sender, receiver) = mpsc::unbounded_channel();

            tokio::spawn(async move {
                Self::process_records(receiver, pool).await;
            });

            tracing::info!("DecisionResultWriter created, background task spawned");
            Self { sender }
        }

        async fn process_records(
            mut receiver: mpsc::UnboundedReceiver<DecisionRecord>,
            pool: PgPool,
        ) {
            while let Some(record) = receiver.recv().await {
                match Self::write_to_database(&pool, &record).await {
                    Ok(()) => tracing::debug!(
                        request_id = %record.request_id,
                        "Persisted decision record"
                    ),
                    Err(e) => tracing::error!(
                        request_id = %record.request_id,
                        error = %e,
                        "Failed to persist decision record"
                    ),
                }
            }

            tracing::warn!("Decision result writer background task ended (channel closed)");
        }

        async fn write_to_database(pool: &PgPool, record: &DecisionRecord) -> Result<()> {
            let features = serde_json::to_value(&record.features).map_err(|e| {
                RuntimeError::Persistence(format!("Failed to serialize features: {}", e))
            })?;
            let fired_rules = serde_json::to_value(record.fired_rules).map_err(|e| {
                RuntimeError::Persistence(format!("Failed to serialize fired_rules: {}", e))
            })?;

            let mut tx = pool.begin().await.map_err(|e| {
                RuntimeError::Persistence(format!("Failed to begin transaction: {}", e))
            })?;

            let inserted = sqlx::query(
                r#"
                INSERT INTO transactions (
                    request_id, user_id, tx_id, time_step, features, ml_probability,
                    rule_score, total_rule_score, fired_rules, final_decision, status,
                    probability_source, processing_time_ms, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                ON CONFLICT (request_id) DO NOTHING
                "#,
            )
            .bind(&record.request_id)
            .bind(record.user_id)
            .bind(&record.tx_id)
            .bind(record.time_step)
            .bind(&features)
            .bind(record.ml_probability)
            .bind(record.rule_score)
            .bind(record.total_rule_score)
            .bind(&fired_rules)
            .bind(record.final_decision)
            .bind(record.status.as_str())
            .bind(record.probability_source.as_str())
            .bind(i64::try_from(record.processing_time_ms).unwrap_or(i64::MAX))
            .bind(record.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                RuntimeError::Persistence(format!("Failed to insert transaction: {}", e))
            })?;
            ensure_inserted(inserted.rows_affected(), &record.request_id)?;

            tx.commit().await.map_err(|e| {
                RuntimeError::Persistence(format!("Failed to commit transaction: {}", e))
            })?;

            Ok(())
        }
    }

    impl ResultSink for DecisionResultWriter {
        fn record(&self, record: DecisionRecord) -> Result<()> {
            self.sender.send(record).map_err(|e| {
                RuntimeError::Persistence(format!("Failed to queue decision record: {}", e))
            })
        }
    }
}
