//! Claim Scoring Domain
//!
//! This crate implements the scoring pipeline that turns a raw claim record
//! into a fraud probability and risk score:
//!
//! ```text
//! ClaimRecord -> Feature Encoder -> FeatureVector -> Naive Bayes -> posterior
//!             -> rule adjustments -> Risk Scorer -> (risk score, label)
//! ```
//!
//! The classifier is a categorical Naive Bayes model. Its core simplifying
//! assumption is feature independence given the class; this trades accuracy
//! for cheap, deterministic training and is intentional, not a defect.

pub mod encoder;
pub mod error;
pub mod model;
pub mod ports;
pub mod prediction;
pub mod record;
pub mod risk;
pub mod rules;
pub mod services;
pub mod vocabulary;

pub use encoder::{encode, FeatureVector};
pub use error::{EncodingError, ScoringError};
pub use model::{ClassCounts, FitError, FitOptions, ModelParameters};
pub use ports::{ClaimPort, PredictionPort};
pub use prediction::PredictionRecord;
pub use record::{ClaimLabel, ClaimRecord, LabeledClaim};
pub use risk::{RiskAssessment, RiskLabel, RiskPolicy};
pub use rules::RuleAdjustments;
pub use services::ScoringService;
pub use vocabulary::{FeatureKind, FeatureSpec, FeatureVocabulary};
