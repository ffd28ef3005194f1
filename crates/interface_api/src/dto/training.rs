//! Training upload DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::BatchId;
use domain_scoring::{ClaimLabel, ClassCounts};
use domain_training::{
    BatchStatus, HoldoutReport, RawTrainingRecord, RecordDiagnostic, RetrainOutcome,
};

/// An uploaded historical record with its ground-truth label
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainingRecordDto {
    pub patient_id: String,
    pub patient_name: String,
    pub age: i64,
    pub treatment: String,
    pub hospital: String,
    #[serde(default)]
    pub previous_claims: i64,
    pub claim_amount: Decimal,
    #[serde(default)]
    pub medical_history: Vec<String>,
    pub label: Option<ClaimLabel>,
}

impl From<TrainingRecordDto> for RawTrainingRecord {
    fn from(dto: TrainingRecordDto) -> Self {
        Self {
            patient_id: dto.patient_id,
            patient_name: dto.patient_name,
            age: dto.age,
            treatment: dto.treatment,
            hospital: dto.hospital,
            previous_claims: dto.previous_claims,
            claim_amount: dto.claim_amount,
            medical_history: dto.medical_history,
            label: dto.label,
        }
    }
}

/// A batch upload request
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadBatchRequest {
    pub records: Vec<TrainingRecordDto>,
}

/// Final status of an uploaded batch
#[derive(Debug, Serialize)]
pub struct UploadBatchResponse {
    pub batch_id: BatchId,
    pub status: BatchStatus,
    /// Present when the batch was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrain: Option<RetrainSummary>,
    /// Present when the batch was rejected
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<RecordDiagnostic>,
}

/// Aggregate statistics of an applied retrain
#[derive(Debug, Serialize)]
pub struct RetrainSummary {
    pub model_version: core_kernel::ModelVersionId,
    pub training_set_size: usize,
    pub class_counts: ClassCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<HoldoutReport>,
}

impl UploadBatchResponse {
    /// Response for an applied batch
    pub fn applied(batch_id: BatchId, outcome: RetrainOutcome) -> Self {
        Self {
            batch_id,
            status: BatchStatus::Applied,
            retrain: Some(RetrainSummary {
                model_version: outcome.version,
                training_set_size: outcome.training_set_size,
                class_counts: outcome.class_counts,
                evaluation: outcome.evaluation,
            }),
            diagnostics: Vec::new(),
        }
    }

    /// Response for a rejected batch
    pub fn rejected(batch_id: BatchId, diagnostics: Vec<RecordDiagnostic>) -> Self {
        Self {
            batch_id,
            status: BatchStatus::Rejected,
            retrain: None,
            diagnostics,
        }
    }
}
