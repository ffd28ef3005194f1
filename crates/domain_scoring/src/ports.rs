//! Storage ports for the scoring domain

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, PortError};

use crate::prediction::PredictionRecord;
use crate::record::ClaimRecord;

/// Durable storage for submitted claims
#[async_trait]
pub trait ClaimPort: DomainPort {
    /// Persists a submitted claim
    async fn save_claim(&self, claim: &ClaimRecord) -> Result<(), PortError>;

    /// Fetches a claim by id
    async fn get_claim(&self, id: ClaimId) -> Result<ClaimRecord, PortError>;
}

/// Append-only storage for prediction records
#[async_trait]
pub trait PredictionPort: DomainPort {
    /// Appends a prediction; existing records are never overwritten
    async fn append_prediction(&self, prediction: &PredictionRecord) -> Result<(), PortError>;

    /// Full scoring history of a claim, oldest first
    async fn predictions_for_claim(
        &self,
        id: ClaimId,
    ) -> Result<Vec<PredictionRecord>, PortError>;
}
