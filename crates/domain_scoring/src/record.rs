//! Claim records and training labels

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;

use crate::error::EncodingError;

/// Ground-truth classification of a historical claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimLabel {
    Fraud,
    Legitimate,
}

impl ClaimLabel {
    /// Stable class index used by the classifier tables
    pub fn index(&self) -> usize {
        match self {
            ClaimLabel::Fraud => 0,
            ClaimLabel::Legitimate => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimLabel::Fraud => "fraud",
            ClaimLabel::Legitimate => "legitimate",
        }
    }
}

/// A submitted health-insurance claim
///
/// The field set is fixed; unknown fields are rejected at the API boundary.
/// Records are immutable once constructed and identified by their claim id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Unique identifier
    pub id: ClaimId,
    /// Patient identifier issued by the external system
    pub patient_id: String,
    /// Patient name
    pub patient_name: String,
    /// Patient age in years
    pub age: u32,
    /// Treatment or diagnosis category
    pub treatment: String,
    /// Hospital identifier or type
    pub hospital: String,
    /// Number of prior claims by the same patient
    pub previous_claims: u32,
    /// Claimed amount
    pub claim_amount: Decimal,
    /// Medical history tags
    pub medical_history: Vec<String>,
    /// Submission timestamp
    pub submitted_at: DateTime<Utc>,
}

impl ClaimRecord {
    /// Creates a new claim record, validating structural invariants
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        patient_id: impl Into<String>,
        patient_name: impl Into<String>,
        age: u32,
        treatment: impl Into<String>,
        hospital: impl Into<String>,
        previous_claims: u32,
        claim_amount: Decimal,
        medical_history: Vec<String>,
    ) -> Result<Self, EncodingError> {
        let record = Self {
            id: ClaimId::new_v7(),
            patient_id: patient_id.into(),
            patient_name: patient_name.into(),
            age,
            treatment: treatment.into(),
            hospital: hospital.into(),
            previous_claims,
            claim_amount,
            medical_history,
            submitted_at: Utc::now(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Validates the structural invariants of the record
    pub fn validate(&self) -> Result<(), EncodingError> {
        if self.patient_id.trim().is_empty() {
            return Err(EncodingError::MissingField("patient_id"));
        }
        if self.treatment.trim().is_empty() {
            return Err(EncodingError::MissingField("treatment"));
        }
        if self.hospital.trim().is_empty() {
            return Err(EncodingError::MissingField("hospital"));
        }
        if self.claim_amount.is_sign_negative() {
            return Err(EncodingError::invalid(
                "claim_amount",
                format!("must be non-negative, got {}", self.claim_amount),
            ));
        }
        Ok(())
    }

    /// The primary medical history tag used for encoding
    ///
    /// Empty histories map to the explicit "none" category.
    pub fn primary_history_tag(&self) -> String {
        self.medical_history
            .first()
            .map(|t| normalize(t))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "none".to_string())
    }
}

/// A historical claim with its ground-truth label, used for training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledClaim {
    pub record: ClaimRecord,
    pub label: ClaimLabel,
}

impl LabeledClaim {
    pub fn new(record: ClaimRecord, label: ClaimLabel) -> Self {
        Self { record, label }
    }
}

/// Canonical form for categorical values: trimmed and lowercased
pub(crate) fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
