//! Claim scoring DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ClaimId, ModelVersionId, PredictionId};
use domain_scoring::{ClaimRecord, EncodingError, PredictionRecord, RiskLabel};

/// A live claim submission
///
/// Unknown fields are rejected: live submissions carry exactly this field
/// set, and in particular no ground-truth label.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SubmitClaimRequest {
    #[validate(length(min = 1))]
    pub patient_id: String,
    #[validate(length(min = 1))]
    pub patient_name: String,
    pub age: u32,
    #[validate(length(min = 1))]
    pub treatment: String,
    #[validate(length(min = 1))]
    pub hospital: String,
    #[serde(default)]
    pub previous_claims: u32,
    pub claim_amount: Decimal,
    #[serde(default)]
    pub medical_history: Vec<String>,
}

impl SubmitClaimRequest {
    /// Converts the request into a domain claim record
    pub fn into_record(self) -> Result<ClaimRecord, EncodingError> {
        ClaimRecord::new(
            self.patient_id,
            self.patient_name,
            self.age,
            self.treatment,
            self.hospital,
            self.previous_claims,
            self.claim_amount,
            self.medical_history,
        )
    }
}

/// A persisted prediction
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub prediction_id: PredictionId,
    pub claim_id: ClaimId,
    pub model_version: ModelVersionId,
    pub probability: f64,
    pub risk_score: f64,
    pub label: RiskLabel,
    pub scored_at: DateTime<Utc>,
    pub scored_by: String,
}

impl From<PredictionRecord> for PredictionResponse {
    fn from(record: PredictionRecord) -> Self {
        Self {
            prediction_id: record.id,
            claim_id: record.claim_id,
            model_version: record.model_version,
            probability: record.probability,
            risk_score: record.risk_score,
            label: record.label,
            scored_at: record.scored_at,
            scored_by: record.scored_by,
        }
    }
}
