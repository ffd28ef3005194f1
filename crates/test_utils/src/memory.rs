//! In-memory port adapters
//!
//! Vec/HashMap-backed implementations of the storage ports, used by API
//! and coordinator tests in place of PostgreSQL.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, PortError};
use domain_scoring::{ClaimPort, ClaimRecord, LabeledClaim, PredictionPort, PredictionRecord};
use domain_training::{TrainingBatch, TrainingCorpusPort};

/// In-memory claim storage
#[derive(Default)]
pub struct InMemoryClaimStore {
    claims: RwLock<HashMap<ClaimId, ClaimRecord>>,
}

impl InMemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryClaimStore {}

#[async_trait]
impl ClaimPort for InMemoryClaimStore {
    async fn save_claim(&self, claim: &ClaimRecord) -> Result<(), PortError> {
        self.claims
            .write()
            .map_err(|_| PortError::internal("claim store lock poisoned"))?
            .insert(claim.id, claim.clone());
        Ok(())
    }

    async fn get_claim(&self, id: ClaimId) -> Result<ClaimRecord, PortError> {
        self.claims
            .read()
            .map_err(|_| PortError::internal("claim store lock poisoned"))?
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("ClaimRecord", id))
    }
}

/// In-memory append-only prediction storage
#[derive(Default)]
pub struct InMemoryPredictionStore {
    predictions: RwLock<Vec<PredictionRecord>>,
}

impl InMemoryPredictionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored predictions
    pub fn len(&self) -> usize {
        self.predictions.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DomainPort for InMemoryPredictionStore {}

#[async_trait]
impl PredictionPort for InMemoryPredictionStore {
    async fn append_prediction(&self, prediction: &PredictionRecord) -> Result<(), PortError> {
        self.predictions
            .write()
            .map_err(|_| PortError::internal("prediction store lock poisoned"))?
            .push(prediction.clone());
        Ok(())
    }

    async fn predictions_for_claim(
        &self,
        id: ClaimId,
    ) -> Result<Vec<PredictionRecord>, PortError> {
        Ok(self
            .predictions
            .read()
            .map_err(|_| PortError::internal("prediction store lock poisoned"))?
            .iter()
            .filter(|p| p.claim_id == id)
            .cloned()
            .collect())
    }
}

/// In-memory training corpus and batch storage
#[derive(Default)]
pub struct InMemoryTrainingCorpus {
    batches: RwLock<HashMap<core_kernel::BatchId, TrainingBatch>>,
    corpus: RwLock<Vec<LabeledClaim>>,
}

impl InMemoryTrainingCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-loads labeled history, as if earlier batches had been applied
    pub fn with_history(history: Vec<LabeledClaim>) -> Self {
        Self {
            batches: RwLock::new(HashMap::new()),
            corpus: RwLock::new(history),
        }
    }

    /// Status of a stored batch
    pub fn batch(&self, id: core_kernel::BatchId) -> Option<TrainingBatch> {
        self.batches.read().ok()?.get(&id).cloned()
    }
}

impl DomainPort for InMemoryTrainingCorpus {}

#[async_trait]
impl TrainingCorpusPort for InMemoryTrainingCorpus {
    async fn save_batch(&self, batch: &TrainingBatch) -> Result<(), PortError> {
        self.batches
            .write()
            .map_err(|_| PortError::internal("corpus lock poisoned"))?
            .insert(batch.id, batch.clone());
        Ok(())
    }

    async fn labeled_history(&self) -> Result<Vec<LabeledClaim>, PortError> {
        Ok(self
            .corpus
            .read()
            .map_err(|_| PortError::internal("corpus lock poisoned"))?
            .clone())
    }

    async fn append_to_corpus(&self, claims: &[LabeledClaim]) -> Result<(), PortError> {
        self.corpus
            .write()
            .map_err(|_| PortError::internal("corpus lock poisoned"))?
            .extend(claims.iter().cloned());
        Ok(())
    }
}
