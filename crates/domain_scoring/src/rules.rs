//! Rule-based probability adjustments
//!
//! The classifier's posterior is adjusted by a small set of business
//! rules before the risk scorer applies the decision threshold. Each rule
//! adds a fixed uplift when its condition matches; the adjusted
//! probability is clamped back to [0, 1].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::record::{normalize, ClaimRecord};

/// Configurable uplift rules applied on top of the classifier posterior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleAdjustments {
    /// Claims above this amount receive `high_amount_uplift`
    pub high_amount_threshold: Decimal,
    pub high_amount_uplift: f64,
    /// Patients with more prior claims than this receive `frequent_claims_uplift`
    pub frequent_claims_threshold: u32,
    pub frequent_claims_uplift: f64,
    /// Treatments in this set (normalized) receive `suspicious_treatment_uplift`
    pub suspicious_treatments: Vec<String>,
    pub suspicious_treatment_uplift: f64,
    /// Claims from private hospitals receive `private_hospital_uplift`
    pub private_hospital_uplift: f64,
}

impl Default for RuleAdjustments {
    fn default() -> Self {
        Self {
            high_amount_threshold: dec!(300000),
            high_amount_uplift: 0.10,
            frequent_claims_threshold: 5,
            frequent_claims_uplift: 0.15,
            suspicious_treatments: vec!["cancer".to_string(), "heart disease".to_string()],
            suspicious_treatment_uplift: 0.20,
            private_hospital_uplift: 0.10,
        }
    }
}

impl RuleAdjustments {
    /// An empty rule set: the posterior passes through unchanged
    pub fn none() -> Self {
        Self {
            high_amount_threshold: Decimal::MAX,
            high_amount_uplift: 0.0,
            frequent_claims_threshold: u32::MAX,
            frequent_claims_uplift: 0.0,
            suspicious_treatments: Vec::new(),
            suspicious_treatment_uplift: 0.0,
            private_hospital_uplift: 0.0,
        }
    }

    /// Applies the rule uplifts to a classifier posterior
    pub fn apply(&self, record: &ClaimRecord, probability: f64) -> f64 {
        let mut adjusted = probability;

        if record.claim_amount > self.high_amount_threshold {
            adjusted += self.high_amount_uplift;
        }
        if record.previous_claims > self.frequent_claims_threshold {
            adjusted += self.frequent_claims_uplift;
        }
        let treatment = normalize(&record.treatment);
        if self.suspicious_treatments.iter().any(|t| *t == treatment) {
            adjusted += self.suspicious_treatment_uplift;
        }
        if normalize(&record.hospital) == "private" {
            adjusted += self.private_hospital_uplift;
        }

        adjusted.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(amount: Decimal, previous: u32, treatment: &str, hospital: &str) -> ClaimRecord {
        ClaimRecord::new(
            "PAT-1",
            "Test Patient",
            50,
            treatment,
            hospital,
            previous,
            amount,
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_no_rules_pass_through() {
        let rules = RuleAdjustments::none();
        let record = claim(dec!(900000), 10, "Cancer", "Private");
        assert_eq!(rules.apply(&record, 0.2), 0.2);
    }

    #[test]
    fn test_high_amount_uplift() {
        let rules = RuleAdjustments::default();
        let record = claim(dec!(350000), 0, "Checkup", "Government");
        assert!((rules.apply(&record, 0.2) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_stacked_uplifts_are_clamped() {
        let rules = RuleAdjustments::default();
        let record = claim(dec!(500000), 9, "Cancer", "Private");
        assert_eq!(rules.apply(&record, 0.9), 1.0);
    }

    #[test]
    fn test_suspicious_treatment_matches_normalized() {
        let rules = RuleAdjustments::default();
        let record = claim(dec!(100), 0, "  CANCER ", "Government");
        assert!((rules.apply(&record, 0.1) - 0.3).abs() < 1e-12);
    }
}
