//! Naive Bayes model parameters
//!
//! The classifier treats features as conditionally independent given the
//! class. That independence assumption is the model's core simplification:
//! it trades correlation-awareness for training that is a pure counting
//! exercise, deterministic and cheap to recompute from scratch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::ModelVersionId;

use crate::encoder::FeatureVector;
use crate::error::ScoringError;
use crate::record::ClaimLabel;
use crate::vocabulary::FeatureVocabulary;

/// Number of classes (fraud, legitimate)
const CLASS_COUNT: usize = 2;

/// Per-class record counts of a training set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub fraud: usize,
    pub legitimate: usize,
}

impl ClassCounts {
    pub fn total(&self) -> usize {
        self.fraud + self.legitimate
    }

    pub fn of(&self, label: ClaimLabel) -> usize {
        match label {
            ClaimLabel::Fraud => self.fraud,
            ClaimLabel::Legitimate => self.legitimate,
        }
    }
}

/// Training options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitOptions {
    /// Additive (Laplace) smoothing constant applied to every
    /// feature-value/class count, so unseen combinations never collapse
    /// the posterior to zero.
    pub smoothing: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self { smoothing: 1.0 }
    }
}

/// Errors raised while fitting model parameters
#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    #[error("Training corpus is empty")]
    EmptyCorpus,

    /// Relative-frequency priors degenerate when a class is absent, so a
    /// corpus must contain at least one record of each label.
    #[error("Training corpus contains no {0:?} records")]
    MissingClass(ClaimLabel),

    #[error("Feature vector does not match vocabulary: {0}")]
    VocabularyMismatch(String),

    #[error("Invalid smoothing constant: {0}")]
    InvalidSmoothing(f64),
}

/// A trained, immutable model version
///
/// Exactly one version is active at a time (enforced by the model store);
/// older versions are retained for audit and rollback. All probability
/// tables are stored in log space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Version identifier assigned at training time
    pub version: ModelVersionId,
    /// Training timestamp
    pub trained_at: DateTime<Utc>,
    /// Number of training records
    pub training_set_size: usize,
    /// Per-class record counts
    pub class_counts: ClassCounts,
    /// Smoothing constant used during the fit
    pub smoothing: f64,
    /// Feature vocabulary fixed at training time
    pub vocabulary: FeatureVocabulary,
    /// log P(class), indexed by `ClaimLabel::index`
    pub log_priors: [f64; CLASS_COUNT],
    /// log P(value | class), indexed `[feature][class][value]`
    pub log_likelihoods: Vec<[Vec<f64>; CLASS_COUNT]>,
}

impl ModelParameters {
    /// Fits model parameters from an encoded, labeled corpus
    ///
    /// Priors are relative label frequencies; conditional tables are
    /// Laplace-smoothed relative frequencies of each encoded value given
    /// each class. The computation is deterministic: identical corpus,
    /// options, version and timestamp produce byte-identical parameters.
    pub fn fit(
        corpus: &[(FeatureVector, ClaimLabel)],
        vocabulary: FeatureVocabulary,
        options: FitOptions,
        version: ModelVersionId,
        trained_at: DateTime<Utc>,
    ) -> Result<Self, FitError> {
        if corpus.is_empty() {
            return Err(FitError::EmptyCorpus);
        }
        if !(options.smoothing > 0.0) {
            return Err(FitError::InvalidSmoothing(options.smoothing));
        }

        let class_counts = ClassCounts {
            fraud: corpus
                .iter()
                .filter(|(_, l)| *l == ClaimLabel::Fraud)
                .count(),
            legitimate: corpus
                .iter()
                .filter(|(_, l)| *l == ClaimLabel::Legitimate)
                .count(),
        };
        if class_counts.fraud == 0 {
            return Err(FitError::MissingClass(ClaimLabel::Fraud));
        }
        if class_counts.legitimate == 0 {
            return Err(FitError::MissingClass(ClaimLabel::Legitimate));
        }

        let feature_count = vocabulary.feature_count();
        let cardinalities: Vec<usize> = vocabulary
            .features()
            .iter()
            .map(|f| f.kind.cardinality())
            .collect();

        // Count encoded values per feature, class and value.
        let mut counts: Vec<[Vec<usize>; CLASS_COUNT]> = cardinalities
            .iter()
            .map(|card| [vec![0usize; *card], vec![0usize; *card]])
            .collect();

        for (vector, label) in corpus {
            if vector.len() != feature_count {
                return Err(FitError::VocabularyMismatch(format!(
                    "expected {} features, got {}",
                    feature_count,
                    vector.len()
                )));
            }
            for (feature, value) in vector.values().iter().enumerate() {
                if *value >= cardinalities[feature] {
                    return Err(FitError::VocabularyMismatch(format!(
                        "value {} out of range for feature {}",
                        value, feature
                    )));
                }
                counts[feature][label.index()][*value] += 1;
            }
        }

        let total = class_counts.total() as f64;
        let log_priors = [
            (class_counts.fraud as f64 / total).ln(),
            (class_counts.legitimate as f64 / total).ln(),
        ];

        let alpha = options.smoothing;
        let class_totals = [class_counts.fraud as f64, class_counts.legitimate as f64];
        let log_likelihoods = counts
            .iter()
            .enumerate()
            .map(|(feature, per_class)| {
                let card = cardinalities[feature] as f64;
                let table = |class: usize| -> Vec<f64> {
                    per_class[class]
                        .iter()
                        .map(|count| {
                            ((*count as f64 + alpha) / (class_totals[class] + alpha * card)).ln()
                        })
                        .collect()
                };
                [table(0), table(1)]
            })
            .collect();

        Ok(Self {
            version,
            trained_at,
            training_set_size: corpus.len(),
            class_counts,
            smoothing: alpha,
            vocabulary,
            log_priors,
            log_likelihoods,
        })
    }

    /// Posterior fraud probability for an encoded claim
    ///
    /// Sums log prior and per-feature log likelihoods for both classes and
    /// normalizes with the log-sum-exp trick, so long products of small
    /// probabilities never underflow to zero.
    pub fn predict(&self, vector: &FeatureVector) -> Result<f64, ScoringError> {
        if vector.len() != self.vocabulary.feature_count() {
            return Err(ScoringError::ModelMismatch(format!(
                "feature vector has {} values, model expects {}",
                vector.len(),
                self.vocabulary.feature_count()
            )));
        }

        let mut log_scores = self.log_priors;
        for (feature, value) in vector.values().iter().enumerate() {
            let tables = &self.log_likelihoods[feature];
            if *value >= tables[0].len() {
                return Err(ScoringError::ModelMismatch(format!(
                    "encoded value {} out of range for feature {}",
                    value, feature
                )));
            }
            log_scores[0] += tables[0][*value];
            log_scores[1] += tables[1][*value];
        }

        let max = log_scores[0].max(log_scores[1]);
        let fraud = (log_scores[0] - max).exp();
        let legitimate = (log_scores[1] - max).exp();
        Ok(fraud / (fraud + legitimate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{FeatureKind, FeatureSpec};

    fn vocabulary() -> FeatureVocabulary {
        FeatureVocabulary::new(vec![
            FeatureSpec {
                name: "age".to_string(),
                kind: FeatureKind::Numeric {
                    bin_edges: vec![rust_decimal_macros::dec!(40)],
                },
            },
            FeatureSpec {
                name: "treatment".to_string(),
                kind: FeatureKind::Categorical {
                    categories: vec!["cardiology".to_string(), "orthopedics".to_string()],
                },
            },
        ])
    }

    fn corpus() -> Vec<(FeatureVector, ClaimLabel)> {
        vec![
            (FeatureVector::new(vec![1, 0]), ClaimLabel::Fraud),
            (FeatureVector::new(vec![1, 0]), ClaimLabel::Fraud),
            (FeatureVector::new(vec![0, 1]), ClaimLabel::Legitimate),
            (FeatureVector::new(vec![0, 1]), ClaimLabel::Legitimate),
            (FeatureVector::new(vec![0, 0]), ClaimLabel::Legitimate),
        ]
    }

    fn fit() -> ModelParameters {
        ModelParameters::fit(
            &corpus(),
            vocabulary(),
            FitOptions::default(),
            ModelVersionId::from_uuid(uuid::Uuid::nil()),
            DateTime::<Utc>::UNIX_EPOCH,
        )
        .unwrap()
    }

    #[test]
    fn test_fit_is_deterministic() {
        let a = serde_json::to_vec(&fit()).unwrap();
        let b = serde_json::to_vec(&fit()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_priors_are_relative_frequencies() {
        let model = fit();
        assert!((model.log_priors[0] - (2.0f64 / 5.0).ln()).abs() < 1e-12);
        assert!((model.log_priors[1] - (3.0f64 / 5.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_smoothing_keeps_unseen_values_positive() {
        let model = fit();
        // The unseen treatment bucket (index 2) never occurs in the corpus
        // for either class, yet both conditionals stay finite.
        for class in 0..2 {
            let log_p = model.log_likelihoods[1][class][2];
            assert!(log_p.is_finite());
            assert!(log_p.exp() > 0.0);
        }
    }

    #[test]
    fn test_posterior_is_a_probability() {
        let model = fit();
        for values in [vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1], vec![1, 2]] {
            let posterior = model.predict(&FeatureVector::new(values)).unwrap();
            assert!((0.0..=1.0).contains(&posterior));
        }
    }

    #[test]
    fn test_fraud_typical_vector_scores_high() {
        let model = fit();
        let fraudish = model.predict(&FeatureVector::new(vec![1, 0])).unwrap();
        let legitish = model.predict(&FeatureVector::new(vec![0, 1])).unwrap();
        assert!(fraudish > 0.5);
        assert!(legitish < 0.5);
    }

    #[test]
    fn test_wrong_vector_length_is_model_mismatch() {
        let model = fit();
        let result = model.predict(&FeatureVector::new(vec![0]));
        assert!(matches!(result, Err(ScoringError::ModelMismatch(_))));
    }

    #[test]
    fn test_single_class_corpus_rejected() {
        let corpus = vec![
            (FeatureVector::new(vec![0, 0]), ClaimLabel::Fraud),
            (FeatureVector::new(vec![1, 1]), ClaimLabel::Fraud),
        ];
        let result = ModelParameters::fit(
            &corpus,
            vocabulary(),
            FitOptions::default(),
            ModelVersionId::new(),
            Utc::now(),
        );
        assert_eq!(result.unwrap_err(), FitError::MissingClass(ClaimLabel::Legitimate));
    }
}
