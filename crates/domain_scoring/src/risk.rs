//! Risk Scorer
//!
//! Converts a fraud probability into a bounded risk score and a
//! fraud/legitimate decision. Pure: no state, no side effects.

use serde::{Deserialize, Serialize};

use core_kernel::CoreError;

/// Decision label attached to a scored claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    Fraud,
    Legitimate,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Fraud => "fraud",
            RiskLabel::Legitimate => "legitimate",
        }
    }
}

/// Threshold policy for the fraud decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPolicy {
    /// Decision boundary for the fraud label
    pub threshold: f64,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl RiskPolicy {
    /// Creates a policy, validating the threshold lies in (0, 1]
    pub fn new(threshold: f64) -> Result<Self, CoreError> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(CoreError::configuration(format!(
                "decision threshold must be in (0, 1], got {threshold}"
            )));
        }
        Ok(Self { threshold })
    }

    /// Scores a fraud probability
    ///
    /// The risk score is a linear transform of the probability onto
    /// [0, 100]; the label is fraud iff the probability reaches the
    /// threshold.
    pub fn score(&self, probability: f64) -> RiskAssessment {
        let probability = probability.clamp(0.0, 1.0);
        let label = if probability >= self.threshold {
            RiskLabel::Fraud
        } else {
            RiskLabel::Legitimate
        };
        RiskAssessment {
            probability,
            risk_score: probability * 100.0,
            label,
        }
    }
}

/// The outcome of scoring a single claim
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Fraud probability in [0, 1], after any rule adjustments
    pub probability: f64,
    /// Risk score in [0, 100]
    pub risk_score: f64,
    /// Decision label
    pub label: RiskLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_follows_threshold() {
        let policy = RiskPolicy::default();
        assert_eq!(policy.score(0.49).label, RiskLabel::Legitimate);
        assert_eq!(policy.score(0.5).label, RiskLabel::Fraud);
        assert_eq!(policy.score(0.51).label, RiskLabel::Fraud);
    }

    #[test]
    fn test_risk_score_is_linear_and_bounded() {
        let policy = RiskPolicy::default();
        assert_eq!(policy.score(0.0).risk_score, 0.0);
        assert_eq!(policy.score(0.25).risk_score, 25.0);
        assert_eq!(policy.score(1.0).risk_score, 100.0);
        assert_eq!(policy.score(2.0).risk_score, 100.0);
    }

    #[test]
    fn test_custom_threshold() {
        let policy = RiskPolicy::new(0.35).unwrap();
        assert_eq!(policy.score(0.4).label, RiskLabel::Fraud);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        assert!(RiskPolicy::new(0.0).is_err());
        assert!(RiskPolicy::new(1.5).is_err());
    }
}
