//! Feature Encoder
//!
//! Maps a claim record onto the fixed-shape feature vector defined by a
//! vocabulary. Encoding is a pure function of the record and the
//! vocabulary: no side effects, and re-encoding the same record against
//! the same vocabulary always yields the same vector.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::record::{normalize, ClaimRecord};
use crate::vocabulary::{
    FeatureVocabulary, FEATURE_AGE, FEATURE_CLAIM_AMOUNT, FEATURE_HISTORY, FEATURE_HOSPITAL,
    FEATURE_PREVIOUS_CLAIMS, FEATURE_TREATMENT,
};

/// An encoded claim: one category index per vocabulary feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<usize>,
}

impl FeatureVector {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[usize] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Encodes a claim record against a vocabulary
///
/// Unseen categorical values map to the vocabulary's unseen bucket and
/// never fail. `EncodingError` is raised only for structurally invalid
/// fields; a vocabulary naming a feature this encoder does not know is
/// version skew and surfaces as `ScoringError::ModelMismatch`.
pub fn encode(
    record: &ClaimRecord,
    vocabulary: &FeatureVocabulary,
) -> Result<FeatureVector, ScoringError> {
    record.validate()?;

    let mut values = Vec::with_capacity(vocabulary.feature_count());
    for spec in vocabulary.features() {
        let value = match spec.name.as_str() {
            FEATURE_AGE => bucket(spec, Decimal::from(record.age))?,
            FEATURE_CLAIM_AMOUNT => bucket(spec, record.claim_amount)?,
            FEATURE_PREVIOUS_CLAIMS => bucket(spec, Decimal::from(record.previous_claims))?,
            FEATURE_TREATMENT => category(spec, &normalize(&record.treatment))?,
            FEATURE_HOSPITAL => category(spec, &normalize(&record.hospital))?,
            FEATURE_HISTORY => category(spec, &record.primary_history_tag())?,
            unknown => {
                return Err(ScoringError::ModelMismatch(format!(
                    "vocabulary feature '{unknown}' is not known to this encoder"
                )))
            }
        };
        values.push(value);
    }
    Ok(FeatureVector::new(values))
}

fn bucket(
    spec: &crate::vocabulary::FeatureSpec,
    value: Decimal,
) -> Result<usize, ScoringError> {
    spec.kind.bucket(value).ok_or_else(|| {
        ScoringError::ModelMismatch(format!(
            "feature '{}' is categorical in the vocabulary but numeric in the claim",
            spec.name
        ))
    })
}

fn category(
    spec: &crate::vocabulary::FeatureSpec,
    value: &str,
) -> Result<usize, ScoringError> {
    spec.kind.category_index(value).ok_or_else(|| {
        ScoringError::ModelMismatch(format!(
            "feature '{}' is numeric in the vocabulary but categorical in the claim",
            spec.name
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ClaimLabel, LabeledClaim};
    use rust_decimal_macros::dec;

    fn corpus() -> Vec<LabeledClaim> {
        let mut claims = Vec::new();
        for i in 0..8u32 {
            let record = ClaimRecord::new(
                format!("PAT-{i}"),
                "Test Patient",
                30 + i,
                if i % 2 == 0 { "Cardiology" } else { "Orthopedics" },
                if i % 2 == 0 { "Private" } else { "Government" },
                i % 3,
                dec!(500) + Decimal::from(i) * dec!(10000),
                vec![],
            )
            .unwrap();
            let label = if i % 2 == 0 {
                ClaimLabel::Fraud
            } else {
                ClaimLabel::Legitimate
            };
            claims.push(LabeledClaim::new(record, label));
        }
        claims
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let corpus = corpus();
        let vocabulary = FeatureVocabulary::from_corpus(&corpus, 4);
        let record = &corpus[0].record;

        let first = encode(record, &vocabulary).unwrap();
        for _ in 0..5 {
            assert_eq!(encode(record, &vocabulary).unwrap(), first);
        }
    }

    #[test]
    fn test_vector_length_matches_vocabulary() {
        let vocabulary = FeatureVocabulary::from_corpus(&corpus(), 4);
        let encoded = encode(&corpus()[0].record, &vocabulary).unwrap();
        assert_eq!(encoded.len(), vocabulary.feature_count());
    }

    #[test]
    fn test_unseen_treatment_does_not_fail() {
        let vocabulary = FeatureVocabulary::from_corpus(&corpus(), 4);
        let record = ClaimRecord::new(
            "PAT-X",
            "Test Patient",
            40,
            "Dermatology",
            "Private",
            0,
            dec!(750),
            vec![],
        )
        .unwrap();

        let encoded = encode(&record, &vocabulary).unwrap();
        assert_eq!(encoded.len(), vocabulary.feature_count());
    }

    #[test]
    fn test_categorical_matching_ignores_case_and_whitespace() {
        let vocabulary = FeatureVocabulary::from_corpus(&corpus(), 4);
        let a = ClaimRecord::new(
            "PAT-X", "Test", 40, "cardiology", "private", 0, dec!(750), vec![],
        )
        .unwrap();
        let b = ClaimRecord::new(
            "PAT-X", "Test", 40, "  Cardiology ", "PRIVATE", 0, dec!(750), vec![],
        )
        .unwrap();

        assert_eq!(
            encode(&a, &vocabulary).unwrap(),
            encode(&b, &vocabulary).unwrap()
        );
    }

    #[test]
    fn test_unknown_vocabulary_feature_is_model_mismatch() {
        use crate::vocabulary::{FeatureKind, FeatureSpec};

        let vocabulary = FeatureVocabulary::new(vec![FeatureSpec {
            name: "blood_type".to_string(),
            kind: FeatureKind::Categorical { categories: vec![] },
        }]);

        let result = encode(&corpus()[0].record, &vocabulary);
        assert!(matches!(result, Err(ScoringError::ModelMismatch(_))));
    }
}
