//! Holdout evaluation
//!
//! After a refit, a deterministically held-out slice of the corpus checks
//! the new parameters before they are published. The split takes every
//! nth record instead of shuffling, so repeated retrains over the same
//! corpus evaluate identically.

use serde::{Deserialize, Serialize};

use domain_scoring::{encode, ClaimLabel, LabeledClaim, ModelParameters, ScoringError};

/// Holdout policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldoutConfig {
    /// Every nth record is held out (0 disables evaluation)
    pub every_nth: usize,
    /// Holdout accuracy below this floor raises a degradation warning
    pub accuracy_floor: f64,
}

impl Default for HoldoutConfig {
    fn default() -> Self {
        Self {
            every_nth: 5,
            accuracy_floor: 0.7,
        }
    }
}

/// Qualitative reading of train vs holdout accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitDiagnosis {
    Overfitting,
    Underfitting,
    GoodFit,
}

/// Evaluation outcome reported with a retrain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldoutReport {
    pub train_accuracy: f64,
    pub holdout_accuracy: f64,
    pub diagnosis: FitDiagnosis,
    /// True when holdout accuracy fell below the configured floor
    pub below_floor: bool,
}

/// Splits a corpus into training and holdout slices
///
/// Records at positions `every_nth - 1, 2*every_nth - 1, ...` are held
/// out. `every_nth` of 0 or 1 disables the holdout entirely.
pub fn split_holdout(
    corpus: &[LabeledClaim],
    every_nth: usize,
) -> (Vec<LabeledClaim>, Vec<LabeledClaim>) {
    if every_nth < 2 {
        return (corpus.to_vec(), Vec::new());
    }
    let mut train = Vec::with_capacity(corpus.len());
    let mut holdout = Vec::with_capacity(corpus.len() / every_nth + 1);
    for (index, claim) in corpus.iter().enumerate() {
        if (index + 1) % every_nth == 0 {
            holdout.push(claim.clone());
        } else {
            train.push(claim.clone());
        }
    }
    (train, holdout)
}

/// Evaluates a fitted model on training and holdout slices
pub fn evaluate(
    model: &ModelParameters,
    train: &[LabeledClaim],
    holdout: &[LabeledClaim],
    accuracy_floor: f64,
) -> Result<HoldoutReport, ScoringError> {
    let train_accuracy = accuracy(model, train)?;
    let holdout_accuracy = accuracy(model, holdout)?;
    Ok(HoldoutReport {
        train_accuracy,
        holdout_accuracy,
        diagnosis: diagnose(train_accuracy, holdout_accuracy),
        below_floor: holdout_accuracy < accuracy_floor,
    })
}

/// Fraction of records whose predicted class matches the label
fn accuracy(model: &ModelParameters, records: &[LabeledClaim]) -> Result<f64, ScoringError> {
    if records.is_empty() {
        return Ok(1.0);
    }
    let mut correct = 0usize;
    for claim in records {
        let vector = encode(&claim.record, &model.vocabulary)?;
        let posterior = model.predict(&vector)?;
        let predicted = if posterior >= 0.5 {
            ClaimLabel::Fraud
        } else {
            ClaimLabel::Legitimate
        };
        if predicted == claim.label {
            correct += 1;
        }
    }
    Ok(correct as f64 / records.len() as f64)
}

fn diagnose(train_accuracy: f64, holdout_accuracy: f64) -> FitDiagnosis {
    if train_accuracy > 0.9 && holdout_accuracy < 0.7 {
        FitDiagnosis::Overfitting
    } else if train_accuracy < 0.7 && holdout_accuracy < 0.7 {
        FitDiagnosis::Underfitting
    } else {
        FitDiagnosis::GoodFit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_is_deterministic_and_disjoint() {
        let corpus: Vec<LabeledClaim> = (0..10u32)
            .map(|i| {
                let record = domain_scoring::ClaimRecord::new(
                    format!("PAT-{i}"),
                    "Test Patient",
                    30 + i,
                    "Checkup",
                    "Government",
                    0,
                    rust_decimal::Decimal::from(100 + i),
                    vec![],
                )
                .unwrap();
                LabeledClaim::new(
                    record,
                    if i % 2 == 0 {
                        ClaimLabel::Legitimate
                    } else {
                        ClaimLabel::Fraud
                    },
                )
            })
            .collect();

        let (train_a, holdout_a) = split_holdout(&corpus, 5);
        let (train_b, holdout_b) = split_holdout(&corpus, 5);

        assert_eq!(train_a, train_b);
        assert_eq!(holdout_a, holdout_b);
        assert_eq!(train_a.len(), 8);
        assert_eq!(holdout_a.len(), 2);
    }

    #[test]
    fn test_split_disabled() {
        let (train, holdout) = split_holdout(&[], 0);
        assert!(train.is_empty());
        assert!(holdout.is_empty());
    }

    #[test]
    fn test_diagnosis_thresholds() {
        assert_eq!(diagnose(0.95, 0.6), FitDiagnosis::Overfitting);
        assert_eq!(diagnose(0.6, 0.6), FitDiagnosis::Underfitting);
        assert_eq!(diagnose(0.85, 0.8), FitDiagnosis::GoodFit);
    }
}
