//! Batch validation
//!
//! Every record must carry a ground-truth label and structurally valid
//! fields. Validation inspects the whole batch and reports every failing
//! record; a single failure rejects the batch in full, so a model is only
//! ever trained on completely validated uploads.

use domain_scoring::{ClaimRecord, LabeledClaim};
use serde::{Deserialize, Serialize};

use crate::batch::RawTrainingRecord;

/// Largest plausible patient age accepted from uploads
const MAX_AGE: i64 = 130;

/// A per-record validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDiagnostic {
    /// Zero-based position of the record in the uploaded batch
    pub index: usize,
    /// Field that failed
    pub field: String,
    /// Human-readable reason
    pub message: String,
}

impl RecordDiagnostic {
    fn new(index: usize, field: &str, message: impl Into<String>) -> Self {
        Self {
            index,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validates an uploaded batch into labeled claims
///
/// Returns every diagnostic rather than stopping at the first, so the
/// uploader can fix the batch in one round trip.
pub fn validate_batch(
    records: &[RawTrainingRecord],
) -> Result<Vec<LabeledClaim>, Vec<RecordDiagnostic>> {
    let mut labeled = Vec::with_capacity(records.len());
    let mut diagnostics = Vec::new();

    for (index, raw) in records.iter().enumerate() {
        match validate_record(index, raw) {
            Ok(claim) => labeled.push(claim),
            Err(mut found) => diagnostics.append(&mut found),
        }
    }

    if diagnostics.is_empty() {
        Ok(labeled)
    } else {
        Err(diagnostics)
    }
}

fn validate_record(
    index: usize,
    raw: &RawTrainingRecord,
) -> Result<LabeledClaim, Vec<RecordDiagnostic>> {
    let mut diagnostics = Vec::new();

    if raw.label.is_none() {
        diagnostics.push(RecordDiagnostic::new(
            index,
            "label",
            "ground-truth label is required for training records",
        ));
    }
    if raw.age < 0 || raw.age > MAX_AGE {
        diagnostics.push(RecordDiagnostic::new(
            index,
            "age",
            format!("age must be in 0..={MAX_AGE}, got {}", raw.age),
        ));
    }
    if raw.previous_claims < 0 {
        diagnostics.push(RecordDiagnostic::new(
            index,
            "previous_claims",
            format!("must be non-negative, got {}", raw.previous_claims),
        ));
    }

    match (raw.label, diagnostics.is_empty()) {
        (Some(label), true) => {
            let record = ClaimRecord::new(
                raw.patient_id.clone(),
                raw.patient_name.clone(),
                raw.age as u32,
                raw.treatment.clone(),
                raw.hospital.clone(),
                raw.previous_claims as u32,
                raw.claim_amount,
                raw.medical_history.clone(),
            )
            .map_err(|err| vec![RecordDiagnostic::new(index, "record", err.to_string())])?;
            Ok(LabeledClaim::new(record, label))
        }
        _ => Err(diagnostics),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_scoring::ClaimLabel;
    use rust_decimal_macros::dec;

    fn raw(age: i64, label: Option<ClaimLabel>) -> RawTrainingRecord {
        RawTrainingRecord {
            patient_id: "PAT-1".to_string(),
            patient_name: "Test Patient".to_string(),
            age,
            treatment: "Checkup".to_string(),
            hospital: "Government".to_string(),
            previous_claims: 0,
            claim_amount: dec!(250),
            medical_history: vec![],
            label,
        }
    }

    #[test]
    fn test_valid_batch_converts_fully() {
        let records = vec![
            raw(30, Some(ClaimLabel::Legitimate)),
            raw(60, Some(ClaimLabel::Fraud)),
        ];
        let labeled = validate_batch(&records).unwrap();
        assert_eq!(labeled.len(), 2);
        assert_eq!(labeled[1].label, ClaimLabel::Fraud);
    }

    #[test]
    fn test_negative_age_fails_whole_batch() {
        let records = vec![
            raw(30, Some(ClaimLabel::Legitimate)),
            raw(-3, Some(ClaimLabel::Fraud)),
            raw(45, Some(ClaimLabel::Legitimate)),
        ];
        let diagnostics = validate_batch(&records).unwrap_err();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].index, 1);
        assert_eq!(diagnostics[0].field, "age");
    }

    #[test]
    fn test_missing_label_is_reported() {
        let records = vec![raw(30, None)];
        let diagnostics = validate_batch(&records).unwrap_err();
        assert_eq!(diagnostics[0].field, "label");
    }

    #[test]
    fn test_all_failures_are_reported_together() {
        let mut bad = raw(-1, None);
        bad.previous_claims = -4;
        let diagnostics = validate_batch(&[bad]).unwrap_err();
        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn test_structural_claim_errors_are_diagnosed() {
        let mut bad = raw(30, Some(ClaimLabel::Fraud));
        bad.claim_amount = dec!(-10);
        let diagnostics = validate_batch(&[bad]).unwrap_err();
        assert_eq!(diagnostics[0].field, "record");
        assert!(diagnostics[0].message.contains("claim_amount"));
    }
}
