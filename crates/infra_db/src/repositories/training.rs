//! Training corpus repository
//!
//! Batches are stored with their serialized records for audit; the
//! labeled corpus itself is an append-only table the coordinator reads in
//! full for each retrain.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};

use core_kernel::{DomainPort, PortError};
use domain_scoring::LabeledClaim;
use domain_training::{BatchStatus, TrainingBatch, TrainingCorpusPort};

use super::port_error;

/// PostgreSQL adapter for training batches and the labeled corpus
#[derive(Debug, Clone)]
pub struct PgTrainingCorpusRepository {
    pool: PgPool,
}

impl PgTrainingCorpusRepository {
    /// Creates a repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PgTrainingCorpusRepository {}

#[async_trait]
impl TrainingCorpusPort for PgTrainingCorpusRepository {
    async fn save_batch(&self, batch: &TrainingBatch) -> Result<(), PortError> {
        let records = serde_json::to_string(&batch.records)
            .map_err(|e| PortError::internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO training_batches (
                batch_id, records, uploaded_by, received_at, status
            ) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (batch_id) DO UPDATE SET status = EXCLUDED.status
            "#,
        )
        .bind(batch.id.as_uuid())
        .bind(records)
        .bind(&batch.uploaded_by)
        .bind(batch.received_at)
        .bind(status_str(batch.status))
        .execute(&self.pool)
        .await
        .map_err(port_error)?;

        Ok(())
    }

    async fn labeled_history(&self) -> Result<Vec<LabeledClaim>, PortError> {
        let rows =
            sqlx::query("SELECT labeled_claim FROM training_corpus ORDER BY entry_id ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(port_error)?;

        rows.into_iter()
            .map(|row| {
                let document: String = row.try_get("labeled_claim").map_err(port_error)?;
                serde_json::from_str(&document).map_err(|e| PortError::internal(e.to_string()))
            })
            .collect()
    }

    async fn append_to_corpus(&self, claims: &[LabeledClaim]) -> Result<(), PortError> {
        let mut tx = self.pool.begin().await.map_err(port_error)?;
        let now = Utc::now();

        for claim in claims {
            let document = serde_json::to_string(claim)
                .map_err(|e| PortError::internal(e.to_string()))?;
            sqlx::query("INSERT INTO training_corpus (labeled_claim, added_at) VALUES ($1, $2)")
                .bind(document)
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_err(port_error)?;
        }

        tx.commit().await.map_err(port_error)?;
        Ok(())
    }
}

fn status_str(status: BatchStatus) -> &'static str {
    match status {
        BatchStatus::Pending => "pending",
        BatchStatus::Applied => "applied",
        BatchStatus::Rejected => "rejected",
    }
}
