//! Storage ports for the training domain

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError};
use domain_scoring::LabeledClaim;

use crate::batch::TrainingBatch;

/// Durable storage for training batches and the labeled corpus
#[async_trait]
pub trait TrainingCorpusPort: DomainPort {
    /// Persists a batch with its current status (insert or status update)
    async fn save_batch(&self, batch: &TrainingBatch) -> Result<(), PortError>;

    /// All labeled claims from previously applied batches, in application
    /// order
    async fn labeled_history(&self) -> Result<Vec<LabeledClaim>, PortError>;

    /// Appends the labeled claims of an applied batch to the corpus
    async fn append_to_corpus(&self, claims: &[LabeledClaim]) -> Result<(), PortError>;
}
