//! Model archive repository
//!
//! Versions are stored as serialized parameter documents. Publishing runs
//! in a transaction that deactivates the previous version and activates
//! the new one; a partial unique index on `is_active` makes two active
//! versions impossible at the database level.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use core_kernel::{DomainPort, ModelVersionId, PortError};
use domain_scoring::ModelParameters;
use model_store::ModelArchive;

use super::port_error;

/// PostgreSQL adapter for the model archive
#[derive(Debug, Clone)]
pub struct PgModelArchive {
    pool: PgPool,
}

impl PgModelArchive {
    /// Creates an archive over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PgModelArchive {}

#[async_trait]
impl ModelArchive for PgModelArchive {
    async fn publish(&self, parameters: &ModelParameters) -> Result<(), PortError> {
        let document = serde_json::to_string(parameters)
            .map_err(|e| PortError::internal(e.to_string()))?;

        let mut tx = self.pool.begin().await.map_err(port_error)?;

        sqlx::query("UPDATE model_versions SET is_active = FALSE WHERE is_active")
            .execute(&mut *tx)
            .await
            .map_err(port_error)?;

        sqlx::query(
            r#"
            INSERT INTO model_versions (
                version, parameters, trained_at, training_set_size,
                published_at, is_active
            ) VALUES ($1, $2, $3, $4, $5, TRUE)
            "#,
        )
        .bind(parameters.version.as_uuid())
        .bind(document)
        .bind(parameters.trained_at)
        .bind(parameters.training_set_size as i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(port_error)?;

        tx.commit().await.map_err(port_error)?;
        Ok(())
    }

    async fn fetch(
        &self,
        version: ModelVersionId,
    ) -> Result<Option<ModelParameters>, PortError> {
        let row = sqlx::query("SELECT parameters FROM model_versions WHERE version = $1")
            .bind(version.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(port_error)?;

        row.map(decode_parameters).transpose()
    }

    async fn fetch_active(&self) -> Result<Option<ModelParameters>, PortError> {
        let row = sqlx::query("SELECT parameters FROM model_versions WHERE is_active")
            .fetch_optional(&self.pool)
            .await
            .map_err(port_error)?;

        row.map(decode_parameters).transpose()
    }

    async fn versions(&self) -> Result<Vec<ModelVersionId>, PortError> {
        let rows = sqlx::query("SELECT version FROM model_versions ORDER BY published_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(port_error)?;

        rows.into_iter()
            .map(|row| {
                Ok(ModelVersionId::from_uuid(
                    row.try_get::<Uuid, _>("version").map_err(port_error)?,
                ))
            })
            .collect()
    }
}

fn decode_parameters(row: sqlx::postgres::PgRow) -> Result<ModelParameters, PortError> {
    let document: String = row.try_get("parameters").map_err(port_error)?;
    serde_json::from_str(&document).map_err(|e| PortError::internal(e.to_string()))
}
