//! Test fixtures
//!
//! Canonical corpora and fitted models shared across the test suite. The
//! seed corpus follows the amount-separated shape used throughout the
//! scoring tests: small government checkups labeled legitimate, large
//! private oncology claims labeled fraud.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::ModelVersionId;
use domain_scoring::{
    encode, ClaimLabel, ClaimRecord, FeatureVocabulary, FitOptions, LabeledClaim, ModelParameters,
};

/// Treatments appearing in fixture data
pub const FIXTURE_TREATMENTS: &[&str] = &["Checkup", "Cancer", "Cardiology", "Orthopedics"];

/// Hospitals appearing in fixture data
pub const FIXTURE_HOSPITALS: &[&str] = &["Government", "Private", "Charity", "Clinic"];

static SEED_CORPUS: Lazy<Vec<LabeledClaim>> = Lazy::new(|| {
    let mut corpus = Vec::new();
    for i in 0..10u32 {
        let record = ClaimRecord::new(
            format!("PAT-L{i}"),
            "Seed Legitimate",
            30 + i,
            "Checkup",
            "Government",
            0,
            dec!(120) + Decimal::from(i * 70),
            vec![],
        )
        .expect("seed record is valid");
        corpus.push(LabeledClaim::new(record, ClaimLabel::Legitimate));
    }
    for i in 0..10u32 {
        let record = ClaimRecord::new(
            format!("PAT-F{i}"),
            "Seed Fraud",
            52 + i,
            "Cancer",
            "Private",
            6,
            dec!(52000) + Decimal::from(i * 1800),
            vec!["chronic".to_string()],
        )
        .expect("seed record is valid");
        corpus.push(LabeledClaim::new(record, ClaimLabel::Fraud));
    }
    corpus
});

/// A 20-record labeled corpus: 10 legitimate, 10 fraudulent
pub fn seed_corpus() -> Vec<LabeledClaim> {
    SEED_CORPUS.clone()
}

/// Fits a model over the seed corpus with fixed version and timestamp
pub fn seed_model() -> ModelParameters {
    let corpus = seed_corpus();
    let vocabulary = FeatureVocabulary::from_corpus(&corpus, 4);
    let encoded: Vec<_> = corpus
        .iter()
        .map(|c| (encode(&c.record, &vocabulary).expect("seed encodes"), c.label))
        .collect();
    ModelParameters::fit(
        &encoded,
        vocabulary,
        FitOptions::default(),
        ModelVersionId::from_uuid(uuid::Uuid::nil()),
        DateTime::<Utc>::UNIX_EPOCH,
    )
    .expect("seed corpus fits")
}

/// A claim matching the fraud profile of the seed corpus
pub fn fraud_typical_claim() -> ClaimRecord {
    ClaimRecord::new(
        "PAT-SUSPECT",
        "Fixture Suspect",
        58,
        "Cancer",
        "Private",
        6,
        dec!(60000),
        vec!["chronic".to_string()],
    )
    .expect("fixture claim is valid")
}

/// A claim matching the legitimate profile of the seed corpus
pub fn legitimate_typical_claim() -> ClaimRecord {
    ClaimRecord::new(
        "PAT-ROUTINE",
        "Fixture Routine",
        34,
        "Checkup",
        "Government",
        0,
        dec!(280),
        vec![],
    )
    .expect("fixture claim is valid")
}
