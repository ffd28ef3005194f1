//! Retraining Coordinator
//!
//! Drives a batch from upload to a published model version. The fit runs
//! entirely outside any lock; only the store's publish step is exclusive,
//! so scoring continues undisturbed for the whole retrain.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

use core_kernel::ModelVersionId;
use domain_scoring::{
    encode, ClassCounts, FeatureVocabulary, FitOptions, LabeledClaim, ModelParameters,
};
use model_store::ModelStore;

use crate::batch::TrainingBatch;
use crate::error::RetrainError;
use crate::evaluation::{evaluate, split_holdout, HoldoutConfig, HoldoutReport};
use crate::ports::TrainingCorpusPort;
use crate::validation::validate_batch;

/// Retraining tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Laplace smoothing constant
    pub smoothing: f64,
    /// Bucket count for numeric features
    pub numeric_bins: usize,
    /// Holdout evaluation policy
    pub holdout: HoldoutConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            smoothing: 1.0,
            numeric_bins: 4,
            holdout: HoldoutConfig::default(),
        }
    }
}

/// Cooperative cancellation for an in-flight ingest
///
/// Cancellation is not interruption: a running fit completes (or its
/// result is discarded wholesale), but a cancelled ingest never publishes.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Aggregate statistics of a completed retrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrainOutcome {
    /// The newly published version
    pub version: ModelVersionId,
    /// Records the model was fitted on (training split)
    pub training_set_size: usize,
    /// Per-class counts of the training split
    pub class_counts: ClassCounts,
    /// Holdout evaluation, when configured
    pub evaluation: Option<HoldoutReport>,
}

/// Ingests labeled batches and publishes new model versions
pub struct RetrainingCoordinator {
    store: Arc<ModelStore>,
    corpus: Arc<dyn TrainingCorpusPort>,
    config: TrainingConfig,
    /// One retrain in flight at a time
    retrain_lock: Mutex<()>,
}

impl RetrainingCoordinator {
    pub fn new(
        store: Arc<ModelStore>,
        corpus: Arc<dyn TrainingCorpusPort>,
        config: TrainingConfig,
    ) -> Self {
        Self {
            store,
            corpus,
            config,
            retrain_lock: Mutex::new(()),
        }
    }

    /// Ingests a batch and publishes a new model version
    ///
    /// The whole batch is validated first; any structural failure rejects
    /// it with per-record diagnostics and leaves the active model
    /// untouched. On success the model is refitted from the full labeled
    /// corpus plus the new batch and published as a fresh version.
    pub async fn ingest(
        &self,
        mut batch: TrainingBatch,
        cancellation: &CancellationFlag,
    ) -> Result<RetrainOutcome, RetrainError> {
        if batch.records.is_empty() {
            return Err(RetrainError::EmptyBatch);
        }

        let _running = self.retrain_lock.lock().await;

        self.corpus.save_batch(&batch).await?;

        let new_claims = match validate_batch(&batch.records) {
            Ok(claims) => claims,
            Err(diagnostics) => {
                batch.mark_rejected()?;
                self.corpus.save_batch(&batch).await?;
                warn!(
                    batch = %batch.id,
                    failures = diagnostics.len(),
                    "rejected training batch"
                );
                return Err(RetrainError::BatchRejected {
                    batch_id: batch.id,
                    diagnostics,
                });
            }
        };

        // Full-corpus retrain: applied history plus the new batch.
        let mut corpus = self.corpus.labeled_history().await?;
        corpus.extend(new_claims.iter().cloned());

        let (train, holdout) = split_holdout(&corpus, self.config.holdout.every_nth);

        let parameters = self.fit(&train)?;
        let evaluation = if holdout.is_empty() {
            None
        } else {
            let report = evaluate(
                &parameters,
                &train,
                &holdout,
                self.config.holdout.accuracy_floor,
            )?;
            if report.below_floor {
                warn!(
                    batch = %batch.id,
                    holdout_accuracy = report.holdout_accuracy,
                    floor = self.config.holdout.accuracy_floor,
                    "holdout accuracy below configured floor; publishing anyway"
                );
            }
            Some(report)
        };

        if cancellation.is_cancelled() {
            info!(batch = %batch.id, "ingest cancelled; discarding fitted model");
            return Err(RetrainError::Cancelled);
        }

        let version = self.store.publish(parameters).await?;

        batch.mark_applied()?;
        self.corpus.save_batch(&batch).await?;
        self.corpus.append_to_corpus(&new_claims).await?;

        let outcome = RetrainOutcome {
            version,
            training_set_size: train.len(),
            class_counts: ClassCounts {
                fraud: count_label(&train, domain_scoring::ClaimLabel::Fraud),
                legitimate: count_label(&train, domain_scoring::ClaimLabel::Legitimate),
            },
            evaluation,
        };

        info!(
            batch = %batch.id,
            version = %outcome.version,
            training_set_size = outcome.training_set_size,
            fraud = outcome.class_counts.fraud,
            legitimate = outcome.class_counts.legitimate,
            "published retrained model"
        );
        Ok(outcome)
    }

    /// Fits new parameters from the training split
    fn fit(&self, train: &[LabeledClaim]) -> Result<ModelParameters, RetrainError> {
        let vocabulary = FeatureVocabulary::from_corpus(train, self.config.numeric_bins);
        let mut encoded = Vec::with_capacity(train.len());
        for claim in train {
            encoded.push((encode(&claim.record, &vocabulary)?, claim.label));
        }
        Ok(ModelParameters::fit(
            &encoded,
            vocabulary,
            FitOptions {
                smoothing: self.config.smoothing,
            },
            ModelVersionId::new_v7(),
            Utc::now(),
        )?)
    }
}

fn count_label(claims: &[LabeledClaim], label: domain_scoring::ClaimLabel) -> usize {
    claims.iter().filter(|c| c.label == label).count()
}
