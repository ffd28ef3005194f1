//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields; names come from `fake` so
//! fixtures read like real data.

use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Principal;
use domain_scoring::{ClaimLabel, ClaimRecord, LabeledClaim};
use domain_training::{RawTrainingRecord, TrainingBatch};

/// Builder for claim records
pub struct ClaimRecordBuilder {
    patient_id: String,
    patient_name: String,
    age: u32,
    treatment: String,
    hospital: String,
    previous_claims: u32,
    claim_amount: Decimal,
    medical_history: Vec<String>,
}

impl Default for ClaimRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimRecordBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            patient_id: "PAT-0001".to_string(),
            patient_name: Name().fake(),
            age: 40,
            treatment: "Checkup".to_string(),
            hospital: "Government".to_string(),
            previous_claims: 0,
            claim_amount: dec!(500),
            medical_history: vec![],
        }
    }

    /// Sets the patient identifier
    pub fn with_patient_id(mut self, id: impl Into<String>) -> Self {
        self.patient_id = id.into();
        self
    }

    /// Sets the age
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    /// Sets the treatment
    pub fn with_treatment(mut self, treatment: impl Into<String>) -> Self {
        self.treatment = treatment.into();
        self
    }

    /// Sets the hospital
    pub fn with_hospital(mut self, hospital: impl Into<String>) -> Self {
        self.hospital = hospital.into();
        self
    }

    /// Sets the prior claim count
    pub fn with_previous_claims(mut self, count: u32) -> Self {
        self.previous_claims = count;
        self
    }

    /// Sets the claim amount
    pub fn with_claim_amount(mut self, amount: Decimal) -> Self {
        self.claim_amount = amount;
        self
    }

    /// Sets the medical history tags
    pub fn with_medical_history(mut self, tags: Vec<String>) -> Self {
        self.medical_history = tags;
        self
    }

    /// Builds the claim record
    pub fn build(self) -> ClaimRecord {
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
        .expect("builder produces valid records")
    }

    /// Builds a labeled claim
    pub fn build_labeled(self, label: ClaimLabel) -> LabeledClaim {
        LabeledClaim::new(self.build(), label)
    }
}

/// Builder for training batches of raw records
pub struct TrainingBatchBuilder {
    records: Vec<RawTrainingRecord>,
    uploaded_by: Principal,
}

impl Default for TrainingBatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingBatchBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            uploaded_by: Principal::new("test-uploader", vec!["batch:upload".to_string()]),
        }
    }

    /// Sets the uploading principal
    pub fn with_uploader(mut self, principal: Principal) -> Self {
        self.uploaded_by = principal;
        self
    }

    /// Appends a raw record
    pub fn with_record(mut self, record: RawTrainingRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Appends `count` legitimate and `count` fraudulent seed-profile records
    pub fn with_balanced_records(mut self, count: u32) -> Self {
        for i in 0..count {
            self.records.push(raw_record(i, ClaimLabel::Legitimate));
            self.records.push(raw_record(i, ClaimLabel::Fraud));
        }
        self
    }

    /// Builds the pending batch
    pub fn build(self) -> TrainingBatch {
        TrainingBatch::new(self.records, &self.uploaded_by)
    }
}

/// A raw training record matching the seed corpus profile for its label
pub fn raw_record(i: u32, label: ClaimLabel) -> RawTrainingRecord {
    let fraudulent = label == ClaimLabel::Fraud;
    RawTrainingRecord {
        patient_id: format!("PAT-{}{i}", if fraudulent { "F" } else { "L" }),
        patient_name: Name().fake(),
        age: if fraudulent { 52 + i as i64 } else { 30 + i as i64 },
        treatment: if fraudulent { "Cancer" } else { "Checkup" }.to_string(),
        hospital: if fraudulent { "Private" } else { "Government" }.to_string(),
        previous_claims: if fraudulent { 6 } else { 0 },
        claim_amount: if fraudulent {
            dec!(52000) + Decimal::from(i * 1800)
        } else {
            dec!(120) + Decimal::from(i * 70)
        },
        medical_history: if fraudulent {
            vec!["chronic".to_string()]
        } else {
            vec![]
        },
        label: Some(label),
    }
}
