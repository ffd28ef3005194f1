//! Model Retraining Domain
//!
//! Ingests uploaded batches of labeled historical claims and turns them
//! into new model versions:
//!
//! ```text
//! TrainingBatch -> structural validation -> full-corpus refit
//!               -> holdout evaluation -> atomic publish
//! ```
//!
//! A batch is applied in full or rejected in full; the active model is
//! never touched until a complete replacement version has been durably
//! published.

pub mod batch;
pub mod coordinator;
pub mod error;
pub mod evaluation;
pub mod ports;
pub mod validation;

pub use batch::{BatchStatus, RawTrainingRecord, TrainingBatch};
pub use coordinator::{CancellationFlag, RetrainOutcome, RetrainingCoordinator, TrainingConfig};
pub use error::RetrainError;
pub use evaluation::{FitDiagnosis, HoldoutConfig, HoldoutReport};
pub use ports::TrainingCorpusPort;
pub use validation::{validate_batch, RecordDiagnostic};
