//! Training domain errors

use thiserror::Error;

use core_kernel::{BatchId, CoreError, PortError};
use domain_scoring::{FitError, ScoringError};
use model_store::StoreError;

use crate::validation::RecordDiagnostic;

/// Errors raised while ingesting a training batch
#[derive(Debug, Error)]
pub enum RetrainError {
    #[error("Training batch contains no records")]
    EmptyBatch,

    /// Structural validation failed; the whole batch was rejected and the
    /// active model left untouched.
    #[error("Batch {batch_id} rejected: {} record(s) failed validation", diagnostics.len())]
    BatchRejected {
        batch_id: BatchId,
        diagnostics: Vec<RecordDiagnostic>,
    },

    /// Ingestion was cancelled after fitting but before publish; the
    /// fitted parameters were discarded wholesale.
    #[error("Retraining cancelled before publish")]
    Cancelled,

    #[error("Fit error: {0}")]
    Fit(#[from] FitError),

    #[error("Scoring pipeline error during retrain: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Model store error: {0}")]
    Store(#[from] StoreError),

    #[error("Corpus storage error: {0}")]
    Corpus(#[from] PortError),

    #[error(transparent)]
    State(#[from] CoreError),
}
