//! Claims repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use core_kernel::{ClaimId, DomainPort, PortError};
use domain_scoring::{ClaimPort, ClaimRecord};

use super::port_error;

/// PostgreSQL adapter for submitted claims
#[derive(Debug, Clone)]
pub struct PgClaimRepository {
    pool: PgPool,
}

impl PgClaimRepository {
    /// Creates a repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PgClaimRepository {}

#[async_trait]
impl ClaimPort for PgClaimRepository {
    async fn save_claim(&self, claim: &ClaimRecord) -> Result<(), PortError> {
        let history = serde_json::to_string(&claim.medical_history)
            .map_err(|e| PortError::internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO claims (
                claim_id, patient_id, patient_name, age, treatment, hospital,
                previous_claims, claim_amount, medical_history, submitted_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(claim.id.as_uuid())
        .bind(&claim.patient_id)
        .bind(&claim.patient_name)
        .bind(claim.age as i64)
        .bind(&claim.treatment)
        .bind(&claim.hospital)
        .bind(claim.previous_claims as i64)
        .bind(claim.claim_amount)
        .bind(history)
        .bind(claim.submitted_at)
        .execute(&self.pool)
        .await
        .map_err(port_error)?;

        Ok(())
    }

    async fn get_claim(&self, id: ClaimId) -> Result<ClaimRecord, PortError> {
        let row = sqlx::query(
            r#"
            SELECT claim_id, patient_id, patient_name, age, treatment, hospital,
                   previous_claims, claim_amount, medical_history, submitted_at
            FROM claims
            WHERE claim_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(port_error)?
        .ok_or_else(|| PortError::not_found("ClaimRecord", id))?;

        let history: String = row.try_get("medical_history").map_err(port_error)?;
        let medical_history: Vec<String> = serde_json::from_str(&history)
            .map_err(|e| PortError::internal(e.to_string()))?;

        Ok(ClaimRecord {
            id: ClaimId::from_uuid(row.try_get::<Uuid, _>("claim_id").map_err(port_error)?),
            patient_id: row.try_get("patient_id").map_err(port_error)?,
            patient_name: row.try_get("patient_name").map_err(port_error)?,
            age: row.try_get::<i64, _>("age").map_err(port_error)? as u32,
            treatment: row.try_get("treatment").map_err(port_error)?,
            hospital: row.try_get("hospital").map_err(port_error)?,
            previous_claims: row.try_get::<i64, _>("previous_claims").map_err(port_error)? as u32,
            claim_amount: row.try_get::<Decimal, _>("claim_amount").map_err(port_error)?,
            medical_history,
            submitted_at: row
                .try_get::<DateTime<Utc>, _>("submitted_at")
                .map_err(port_error)?,
        })
    }
}
