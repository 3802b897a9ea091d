//! Best-effort persistence of predictions and chat history
//!
//! Both tables are append-only. A failed write never fails the request that
//! produced the record; callers get a [`PersistenceOutcome`] instead.

use async_trait::async_trait;
use shared::{ChatRecord, PersistenceOutcome, PredictionRecord};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use std::{future::Future, str::FromStr, sync::Arc, time::Duration};
use thiserror::Error;
use uuid::Uuid;

use crate::config::DatabaseConfig;

/// Persistence failure
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Write timed out after {0:?}")]
    Timeout(Duration),
}

/// Append-only store for request history
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn record_prediction(&self, record: &PredictionRecord) -> Result<(), SinkError>;

    async fn record_chat(&self, record: &ChatRecord) -> Result<(), SinkError>;
}

/// PostgreSQL-backed sink
#[derive(Clone)]
pub struct PgRecordSink {
    db: PgPool,
}

impl PgRecordSink {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Connect, run migrations, and return a ready sink.
    /// Every session gets `statement_timeout` set to the write timeout.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, SinkError> {
        let options = PgConnectOptions::from_str(&config.url)?
            .options([("statement_timeout", config.write_timeout_ms.to_string())]);

        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.write_timeout())
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&db).await?;

        Ok(Self::new(db))
    }
}

#[async_trait]
impl RecordSink for PgRecordSink {
    async fn record_prediction(&self, record: &PredictionRecord) -> Result<(), SinkError> {
        let data = serde_json::to_value(&record.data)?;

        sqlx::query(
            r#"
            INSERT INTO predictions (id, user_id, data, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.user)
        .bind(data)
        .bind(record.timestamp)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn record_chat(&self, record: &ChatRecord) -> Result<(), SinkError> {
        sqlx::query(
            r#"
            INSERT INTO chat_history (id, user_id, message, reply, lang, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.user)
        .bind(&record.message)
        .bind(&record.reply)
        .bind(&record.lang)
        .bind(record.timestamp)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}

/// Run one sink write, giving up after `limit`
pub(crate) async fn bounded<F>(limit: Duration, write: F) -> Result<(), SinkError>
where
    F: Future<Output = Result<(), SinkError>>,
{
    tokio::time::timeout(limit, write)
        .await
        .map_err(|_| SinkError::Timeout(limit))?
}

/// Turn a sink result into an outcome, logging failures
pub(crate) fn settle(kind: &str, result: Option<Result<(), SinkError>>) -> PersistenceOutcome {
    match result {
        None => PersistenceOutcome::Skipped,
        Some(Ok(())) => {
            tracing::debug!("Stored {} record", kind);
            PersistenceOutcome::Stored
        }
        Some(Err(e)) => {
            tracing::warn!("Failed to store {} record: {}", kind, e);
            PersistenceOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Write bound used when a service is not given one
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared handle to an optional sink
pub type SharedSink = Option<Arc<dyn RecordSink>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_outcomes() {
        assert_eq!(settle("prediction", None), PersistenceOutcome::Skipped);
        assert_eq!(settle("prediction", Some(Ok(()))), PersistenceOutcome::Stored);

        let failed = settle("chat", Some(Err(SinkError::Database(sqlx::Error::PoolTimedOut))));
        match failed {
            PersistenceOutcome::Failed { reason } => assert!(reason.contains("Database error")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bounded_write_times_out() {
        let limit = Duration::from_millis(10);
        let result = bounded(limit, std::future::pending()).await;
        assert!(matches!(result, Err(SinkError::Timeout(d)) if d == limit));

        assert!(bounded(limit, async { Ok(()) }).await.is_ok());
    }
}
