//! Scoring domain errors

use thiserror::Error;

/// Structural problems with a claim record's fields
///
/// Raised only when a required field is absent or carries a structurally
/// invalid value; unseen categorical values are not an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl EncodingError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EncodingError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while scoring a claim
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Vocabulary drift between the encoder and the active model. This is
    /// a configuration fault (version skew), not a bad claim.
    #[error("Model mismatch: {0}")]
    ModelMismatch(String),
}
