//! Retraining coordinator tests
//!
//! Covers the ingest lifecycle: whole-batch rejection with diagnostics,
//! full-corpus refits across successive batches, cancellation before
//! publish, and the holdout evaluation report.

use std::sync::Arc;
use std::sync::RwLock;

use async_trait::async_trait;
use core_kernel::{DomainPort, PortError, Principal};
use domain_scoring::{ClaimLabel, LabeledClaim};
use domain_training::{
    BatchStatus, CancellationFlag, RawTrainingRecord, RetrainError, RetrainingCoordinator,
    TrainingBatch, TrainingConfig, TrainingCorpusPort,
};
use model_store::{InMemoryModelArchive, ModelStore, StoreError};
use rust_decimal_macros::dec;

/// Vec-backed corpus port for tests
#[derive(Default)]
struct InMemoryCorpus {
    batches: RwLock<Vec<TrainingBatch>>,
    corpus: RwLock<Vec<LabeledClaim>>,
}

impl DomainPort for InMemoryCorpus {}

#[async_trait]
impl TrainingCorpusPort for InMemoryCorpus {
    async fn save_batch(&self, batch: &TrainingBatch) -> Result<(), PortError> {
        let mut batches = self.batches.write().unwrap();
        if let Some(existing) = batches.iter_mut().find(|b| b.id == batch.id) {
            *existing = batch.clone();
        } else {
            batches.push(batch.clone());
        }
        Ok(())
    }

    async fn labeled_history(&self) -> Result<Vec<LabeledClaim>, PortError> {
        Ok(self.corpus.read().unwrap().clone())
    }

    async fn append_to_corpus(&self, claims: &[LabeledClaim]) -> Result<(), PortError> {
        self.corpus.write().unwrap().extend(claims.iter().cloned());
        Ok(())
    }
}

impl InMemoryCorpus {
    fn batch_status(&self, batch: &TrainingBatch) -> Option<BatchStatus> {
        self.batches
            .read()
            .unwrap()
            .iter()
            .find(|b| b.id == batch.id)
            .map(|b| b.status)
    }
}

fn record(i: u32, label: ClaimLabel) -> RawTrainingRecord {
    let fraudulent = label == ClaimLabel::Fraud;
    RawTrainingRecord {
        patient_id: format!("PAT-{i}"),
        patient_name: "Test Patient".to_string(),
        age: if fraudulent { 55 + i as i64 } else { 30 + i as i64 },
        treatment: if fraudulent { "Cancer" } else { "Checkup" }.to_string(),
        hospital: if fraudulent { "Private" } else { "Government" }.to_string(),
        previous_claims: if fraudulent { 6 } else { 0 },
        claim_amount: if fraudulent {
            dec!(51000) + rust_decimal::Decimal::from(i * 1000)
        } else {
            dec!(150) + rust_decimal::Decimal::from(i * 40)
        },
        medical_history: vec![],
        label: Some(label),
    }
}

/// Alternating labels so every contiguous slice keeps both classes
fn balanced_records(count: u32) -> Vec<RawTrainingRecord> {
    (0..count)
        .map(|i| {
            record(
                i,
                if i % 2 == 0 {
                    ClaimLabel::Legitimate
                } else {
                    ClaimLabel::Fraud
                },
            )
        })
        .collect()
}

fn coordinator(
    store: Arc<ModelStore>,
    corpus: Arc<InMemoryCorpus>,
) -> RetrainingCoordinator {
    RetrainingCoordinator::new(store, corpus, TrainingConfig::default())
}

#[tokio::test]
async fn successful_ingest_publishes_and_applies_batch() {
    let store = Arc::new(ModelStore::new(Arc::new(InMemoryModelArchive::new())));
    let corpus = Arc::new(InMemoryCorpus::default());
    let coordinator = coordinator(store.clone(), corpus.clone());

    let batch = TrainingBatch::new(balanced_records(20), &Principal::new("uploader", vec![]));
    let outcome = coordinator
        .ingest(batch.clone(), &CancellationFlag::new())
        .await
        .unwrap();

    // 20 records, every 5th held out.
    assert_eq!(outcome.training_set_size, 16);
    assert_eq!(outcome.class_counts.total(), 16);
    assert!(outcome.evaluation.is_some());

    assert_eq!(store.active().unwrap().version, outcome.version);
    assert_eq!(corpus.batch_status(&batch), Some(BatchStatus::Applied));
    assert_eq!(corpus.labeled_history().await.unwrap().len(), 20);
}

#[tokio::test]
async fn invalid_record_rejects_whole_batch_and_keeps_model() {
    let store = Arc::new(ModelStore::new(Arc::new(InMemoryModelArchive::new())));
    let corpus = Arc::new(InMemoryCorpus::default());
    let coordinator = coordinator(store.clone(), corpus.clone());

    // Establish a baseline model first.
    let first = coordinator
        .ingest(
            TrainingBatch::new(balanced_records(20), &Principal::system()),
            &CancellationFlag::new(),
        )
        .await
        .unwrap();

    // One negative age poisons the entire second batch.
    let mut records = balanced_records(10);
    records[3].age = -7;
    let batch = TrainingBatch::new(records, &Principal::new("uploader", vec![]));

    let err = coordinator
        .ingest(batch.clone(), &CancellationFlag::new())
        .await
        .unwrap_err();

    match err {
        RetrainError::BatchRejected { diagnostics, .. } => {
            assert_eq!(diagnostics.len(), 1);
            assert_eq!(diagnostics[0].index, 3);
            assert_eq!(diagnostics[0].field, "age");
        }
        other => panic!("expected BatchRejected, got {other:?}"),
    }

    assert_eq!(corpus.batch_status(&batch), Some(BatchStatus::Rejected));
    // Active version unchanged, corpus unchanged.
    assert_eq!(store.active().unwrap().version, first.version);
    assert_eq!(corpus.labeled_history().await.unwrap().len(), 20);
}

#[tokio::test]
async fn cancelled_ingest_publishes_nothing() {
    let store = Arc::new(ModelStore::new(Arc::new(InMemoryModelArchive::new())));
    let corpus = Arc::new(InMemoryCorpus::default());
    let coordinator = coordinator(store.clone(), corpus.clone());

    let cancellation = CancellationFlag::new();
    cancellation.cancel();

    let err = coordinator
        .ingest(
            TrainingBatch::new(balanced_records(20), &Principal::system()),
            &cancellation,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RetrainError::Cancelled));
    assert!(matches!(store.active(), Err(StoreError::NoActiveModel)));
    assert!(corpus.labeled_history().await.unwrap().is_empty());
}

#[tokio::test]
async fn successive_batches_retrain_on_full_corpus() {
    let store = Arc::new(ModelStore::new(Arc::new(InMemoryModelArchive::new())));
    let corpus = Arc::new(InMemoryCorpus::default());
    let coordinator = coordinator(store.clone(), corpus.clone());

    let first = coordinator
        .ingest(
            TrainingBatch::new(balanced_records(20), &Principal::system()),
            &CancellationFlag::new(),
        )
        .await
        .unwrap();

    let second = coordinator
        .ingest(
            TrainingBatch::new(balanced_records(10), &Principal::system()),
            &CancellationFlag::new(),
        )
        .await
        .unwrap();

    assert_ne!(first.version, second.version);
    // 30 records total, every 5th held out -> 24 trained on.
    assert_eq!(second.training_set_size, 24);

    // Both versions remain in the archive history.
    let versions = store.versions().await.unwrap();
    assert_eq!(versions, vec![first.version, second.version]);
}

#[tokio::test]
async fn empty_batch_is_refused_outright() {
    let store = Arc::new(ModelStore::new(Arc::new(InMemoryModelArchive::new())));
    let corpus = Arc::new(InMemoryCorpus::default());
    let coordinator = coordinator(store, corpus);

    let err = coordinator
        .ingest(
            TrainingBatch::new(vec![], &Principal::system()),
            &CancellationFlag::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RetrainError::EmptyBatch));
}

#[tokio::test]
async fn holdout_can_be_disabled() {
    let store = Arc::new(ModelStore::new(Arc::new(InMemoryModelArchive::new())));
    let corpus = Arc::new(InMemoryCorpus::default());
    let config = TrainingConfig {
        holdout: domain_training::HoldoutConfig {
            every_nth: 0,
            accuracy_floor: 0.7,
        },
        ..TrainingConfig::default()
    };
    let coordinator = RetrainingCoordinator::new(store, corpus, config);

    let outcome = coordinator
        .ingest(
            TrainingBatch::new(balanced_records(20), &Principal::system()),
            &CancellationFlag::new(),
        )
        .await
        .unwrap();

    assert_eq!(outcome.training_set_size, 20);
    assert!(outcome.evaluation.is_none());
}
