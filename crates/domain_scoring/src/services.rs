//! Scoring service
//!
//! Orchestrates the full scoring pipeline against an immutable model
//! snapshot. The service holds no mutable state, so any number of claims
//! can be assessed concurrently against the same snapshot.

use tracing::debug;

use crate::encoder::encode;
use crate::error::ScoringError;
use crate::model::ModelParameters;
use crate::record::ClaimRecord;
use crate::risk::{RiskAssessment, RiskPolicy};
use crate::rules::RuleAdjustments;

/// Encodes, classifies, adjusts and scores claims
#[derive(Debug, Clone)]
pub struct ScoringService {
    policy: RiskPolicy,
    rules: RuleAdjustments,
}

impl ScoringService {
    pub fn new(policy: RiskPolicy, rules: RuleAdjustments) -> Self {
        Self { policy, rules }
    }

    pub fn policy(&self) -> &RiskPolicy {
        &self.policy
    }

    /// Assesses a claim against a model snapshot
    ///
    /// Pipeline: encode against the model's vocabulary, compute the Naive
    /// Bayes posterior, apply rule uplifts, then score and label.
    pub fn assess(
        &self,
        record: &ClaimRecord,
        model: &ModelParameters,
    ) -> Result<RiskAssessment, ScoringError> {
        let vector = encode(record, &model.vocabulary)?;
        let posterior = model.predict(&vector)?;
        let adjusted = self.rules.apply(record, posterior);
        let assessment = self.policy.score(adjusted);

        debug!(
            claim = %record.id,
            model = %model.version,
            posterior,
            adjusted,
            risk_score = assessment.risk_score,
            label = assessment.label.as_str(),
            "assessed claim"
        );
        Ok(assessment)
    }
}

impl Default for ScoringService {
    fn default() -> Self {
        Self::new(RiskPolicy::default(), RuleAdjustments::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FitOptions;
    use crate::record::{ClaimLabel, LabeledClaim};
    use crate::vocabulary::FeatureVocabulary;
    use core_kernel::ModelVersionId;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn training_corpus() -> Vec<LabeledClaim> {
        let mut corpus = Vec::new();
        for i in 0..10u32 {
            let record = ClaimRecord::new(
                format!("PAT-L{i}"),
                "Legit Patient",
                35 + i,
                "Checkup",
                "Government",
                0,
                dec!(200) + Decimal::from(i * 50),
                vec![],
            )
            .unwrap();
            corpus.push(LabeledClaim::new(record, ClaimLabel::Legitimate));
        }
        for i in 0..10u32 {
            let record = ClaimRecord::new(
                format!("PAT-F{i}"),
                "Fraud Patient",
                55 + i,
                "Cancer",
                "Private",
                6,
                dec!(55000) + Decimal::from(i * 1000),
                vec!["chronic".to_string()],
            )
            .unwrap();
            corpus.push(LabeledClaim::new(record, ClaimLabel::Fraud));
        }
        corpus
    }

    fn model() -> ModelParameters {
        let corpus = training_corpus();
        let vocabulary = FeatureVocabulary::from_corpus(&corpus, 4);
        let encoded: Vec<_> = corpus
            .iter()
            .map(|c| (encode(&c.record, &vocabulary).unwrap(), c.label))
            .collect();
        ModelParameters::fit(
            &encoded,
            vocabulary,
            FitOptions::default(),
            ModelVersionId::new(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_fraud_typical_claim_is_flagged() {
        let service = ScoringService::new(RiskPolicy::default(), RuleAdjustments::none());
        let claim = ClaimRecord::new(
            "PAT-X",
            "Suspicious Patient",
            60,
            "Cancer",
            "Private",
            7,
            dec!(60000),
            vec!["chronic".to_string()],
        )
        .unwrap();

        let assessment = service.assess(&claim, &model()).unwrap();
        assert!(assessment.probability > 0.5);
        assert_eq!(assessment.label, crate::risk::RiskLabel::Fraud);
    }

    #[test]
    fn test_legitimate_typical_claim_passes() {
        let service = ScoringService::new(RiskPolicy::default(), RuleAdjustments::none());
        let claim = ClaimRecord::new(
            "PAT-Y",
            "Ordinary Patient",
            38,
            "Checkup",
            "Government",
            0,
            dec!(300),
            vec![],
        )
        .unwrap();

        let assessment = service.assess(&claim, &model()).unwrap();
        assert!(assessment.probability < 0.5);
        assert_eq!(assessment.label, crate::risk::RiskLabel::Legitimate);
    }
}
