//! Predictions repository
//!
//! Prediction rows are append-only: the adapter only ever inserts, and
//! reads return history in scoring order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use core_kernel::{ClaimId, DomainPort, ModelVersionId, PortError, PredictionId};
use domain_scoring::{PredictionPort, PredictionRecord, RiskLabel};

use super::port_error;

/// PostgreSQL adapter for prediction records
#[derive(Debug, Clone)]
pub struct PgPredictionRepository {
    pool: PgPool,
}

impl PgPredictionRepository {
    /// Creates a repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PgPredictionRepository {}

#[async_trait]
impl PredictionPort for PgPredictionRepository {
    async fn append_prediction(&self, prediction: &PredictionRecord) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO predictions (
                prediction_id, claim_id, model_version, probability,
                risk_score, label, scored_at, scored_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(prediction.id.as_uuid())
        .bind(prediction.claim_id.as_uuid())
        .bind(prediction.model_version.as_uuid())
        .bind(prediction.probability)
        .bind(prediction.risk_score)
        .bind(prediction.label.as_str())
        .bind(prediction.scored_at)
        .bind(&prediction.scored_by)
        .execute(&self.pool)
        .await
        .map_err(port_error)?;

        Ok(())
    }

    async fn predictions_for_claim(
        &self,
        id: ClaimId,
    ) -> Result<Vec<PredictionRecord>, PortError> {
        let rows = sqlx::query(
            r#"
            SELECT prediction_id, claim_id, model_version, probability,
                   risk_score, label, scored_at, scored_by
            FROM predictions
            WHERE claim_id = $1
            ORDER BY scored_at ASC
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(port_error)?;

        rows.into_iter()
            .map(|row| {
                let label: String = row.try_get("label").map_err(port_error)?;
                Ok(PredictionRecord {
                    id: PredictionId::from_uuid(
                        row.try_get::<Uuid, _>("prediction_id").map_err(port_error)?,
                    ),
                    claim_id: ClaimId::from_uuid(
                        row.try_get::<Uuid, _>("claim_id").map_err(port_error)?,
                    ),
                    model_version: ModelVersionId::from_uuid(
                        row.try_get::<Uuid, _>("model_version").map_err(port_error)?,
                    ),
                    probability: row.try_get("probability").map_err(port_error)?,
                    risk_score: row.try_get("risk_score").map_err(port_error)?,
                    label: parse_label(&label)?,
                    scored_at: row
                        .try_get::<DateTime<Utc>, _>("scored_at")
                        .map_err(port_error)?,
                    scored_by: row.try_get("scored_by").map_err(port_error)?,
                })
            })
            .collect()
    }
}

fn parse_label(label: &str) -> Result<RiskLabel, PortError> {
    match label {
        "fraud" => Ok(RiskLabel::Fraud),
        "legitimate" => Ok(RiskLabel::Legitimate),
        other => Err(PortError::internal(format!(
            "unknown prediction label '{other}'"
        ))),
    }
}
