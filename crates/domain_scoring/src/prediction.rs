//! Prediction records
//!
//! One record per scoring event. Records are never mutated: re-scoring a
//! claim appends a new record, preserving the full audit history and the
//! model version each score was produced with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, ModelVersionId, PredictionId, Principal};

use crate::risk::{RiskAssessment, RiskLabel};

/// The persisted outcome of scoring a claim against a model version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Unique identifier
    pub id: PredictionId,
    /// The scored claim
    pub claim_id: ClaimId,
    /// Model version that produced this score
    pub model_version: ModelVersionId,
    /// Fraud probability in [0, 1]
    pub probability: f64,
    /// Risk score in [0, 100]
    pub risk_score: f64,
    /// Decision label
    pub label: RiskLabel,
    /// Scoring timestamp
    pub scored_at: DateTime<Utc>,
    /// Subject of the principal that requested the score (audit only)
    pub scored_by: String,
}

impl PredictionRecord {
    /// Creates a prediction record from a risk assessment
    pub fn new(
        claim_id: ClaimId,
        model_version: ModelVersionId,
        assessment: &RiskAssessment,
        scored_by: &Principal,
    ) -> Self {
        Self {
            id: PredictionId::new_v7(),
            claim_id,
            model_version,
            probability: assessment.probability,
            risk_score: assessment.risk_score,
            label: assessment.label,
            scored_at: Utc::now(),
            scored_by: scored_by.subject.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_captures_assessment_and_principal() {
        let assessment = RiskAssessment {
            probability: 0.73,
            risk_score: 73.0,
            label: RiskLabel::Fraud,
        };
        let claim_id = ClaimId::new();
        let version = ModelVersionId::new();
        let principal = Principal::new("analyst-7", vec![]);

        let record = PredictionRecord::new(claim_id, version, &assessment, &principal);

        assert_eq!(record.claim_id, claim_id);
        assert_eq!(record.model_version, version);
        assert_eq!(record.label, RiskLabel::Fraud);
        assert_eq!(record.scored_by, "analyst-7");
    }
}
