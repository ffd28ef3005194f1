//! Training batches

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{BatchId, CoreError, Principal};
use domain_scoring::ClaimLabel;

/// Lifecycle of an uploaded batch
///
/// ```text
/// Pending -> Applied   (retrain succeeded)
/// Pending -> Rejected  (validation failed)
/// ```
///
/// Both transitions are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Pending,
    Applied,
    Rejected,
}

/// An uploaded historical record, not yet validated
///
/// Numeric fields are kept wide on purpose: validation has to see a
/// negative age to report it, rather than failing opaquely during
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrainingRecord {
    pub patient_id: String,
    pub patient_name: String,
    pub age: i64,
    pub treatment: String,
    pub hospital: String,
    pub previous_claims: i64,
    pub claim_amount: Decimal,
    pub medical_history: Vec<String>,
    /// Ground-truth label; required for every training record
    pub label: Option<ClaimLabel>,
}

/// A batch of uploaded labeled history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingBatch {
    /// Batch identifier
    pub id: BatchId,
    /// Uploaded records, in upload order
    pub records: Vec<RawTrainingRecord>,
    /// Subject of the uploading principal (audit only)
    pub uploaded_by: String,
    /// Ingestion timestamp
    pub received_at: DateTime<Utc>,
    /// Current lifecycle status
    pub status: BatchStatus,
}

impl TrainingBatch {
    /// Creates a pending batch from uploaded records
    pub fn new(records: Vec<RawTrainingRecord>, uploaded_by: &Principal) -> Self {
        Self {
            id: BatchId::new_v7(),
            records,
            uploaded_by: uploaded_by.subject.clone(),
            received_at: Utc::now(),
            status: BatchStatus::Pending,
        }
    }

    /// Marks the batch applied
    pub fn mark_applied(&mut self) -> Result<(), CoreError> {
        self.transition_to(BatchStatus::Applied)
    }

    /// Marks the batch rejected
    pub fn mark_rejected(&mut self) -> Result<(), CoreError> {
        self.transition_to(BatchStatus::Rejected)
    }

    fn transition_to(&mut self, target: BatchStatus) -> Result<(), CoreError> {
        if !self.can_transition_to(target) {
            return Err(CoreError::invalid_state(format!(
                "batch {} cannot move from {:?} to {:?}",
                self.id, self.status, target
            )));
        }
        self.status = target;
        Ok(())
    }

    /// Checks if transition is valid
    fn can_transition_to(&self, target: BatchStatus) -> bool {
        use BatchStatus::*;
        matches!(
            (self.status, target),
            (Pending, Applied) | (Pending, Rejected)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(label: Option<ClaimLabel>) -> RawTrainingRecord {
        RawTrainingRecord {
            patient_id: "PAT-1".to_string(),
            patient_name: "Test Patient".to_string(),
            age: 40,
            treatment: "Checkup".to_string(),
            hospital: "Government".to_string(),
            previous_claims: 0,
            claim_amount: dec!(100),
            medical_history: vec![],
            label,
        }
    }

    #[test]
    fn test_new_batch_is_pending() {
        let batch = TrainingBatch::new(
            vec![record(Some(ClaimLabel::Fraud))],
            &Principal::new("uploader-1", vec![]),
        );
        assert_eq!(batch.status, BatchStatus::Pending);
        assert_eq!(batch.uploaded_by, "uploader-1");
    }

    #[test]
    fn test_status_transitions_are_terminal() {
        let mut batch = TrainingBatch::new(vec![], &Principal::system());
        batch.mark_applied().unwrap();
        assert!(batch.mark_rejected().is_err());
        assert!(batch.mark_applied().is_err());

        let mut batch = TrainingBatch::new(vec![], &Principal::system());
        batch.mark_rejected().unwrap();
        assert!(batch.mark_applied().is_err());
    }
}
