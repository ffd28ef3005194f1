//! Property-Based Test Generators
//!
//! Proptest strategies for generating random claim data that maintains
//! domain invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_scoring::{ClaimLabel, ClaimRecord, LabeledClaim};

/// Strategy for valid patient ages
pub fn age_strategy() -> impl Strategy<Value = u32> {
    0u32..110
}

/// Strategy for non-negative claim amounts (stored as cents)
pub fn claim_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..500_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for prior claim counts
pub fn previous_claims_strategy() -> impl Strategy<Value = u32> {
    0u32..15
}

/// Strategy for categorical values (treatments, hospitals, tags)
pub fn category_strategy() -> impl Strategy<Value = String> {
    "[a-z]{3,14}"
}

/// Strategy for claim labels
pub fn label_strategy() -> impl Strategy<Value = ClaimLabel> {
    prop_oneof![Just(ClaimLabel::Fraud), Just(ClaimLabel::Legitimate)]
}

/// Strategy for structurally valid claim records
pub fn claim_record_strategy() -> impl Strategy<Value = ClaimRecord> {
    (
        "[A-Z]{3}-[0-9]{4}",
        age_strategy(),
        category_strategy(),
        category_strategy(),
        previous_claims_strategy(),
        claim_amount_strategy(),
        prop::collection::vec(category_strategy(), 0..3),
    )
        .prop_map(
            |(patient_id, age, treatment, hospital, previous, amount, history)| {
                ClaimRecord::new(
                    patient_id,
                    "Generated Patient",
                    age,
                    treatment,
                    hospital,
                    previous,
                    amount,
                    history,
                )
                .expect("generated record is structurally valid")
            },
        )
}

/// Strategy for labeled claims
pub fn labeled_claim_strategy() -> impl Strategy<Value = LabeledClaim> {
    (claim_record_strategy(), label_strategy())
        .prop_map(|(record, label)| LabeledClaim::new(record, label))
}
