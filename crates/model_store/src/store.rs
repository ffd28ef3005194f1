//! Versioned model store

use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;
use tracing::info;

use core_kernel::ModelVersionId;
use domain_scoring::ModelParameters;

use crate::archive::ModelArchive;
use crate::error::StoreError;

/// The single source of the active model version
///
/// Scoring readers take a cheap `Arc` snapshot and never block on a
/// publish; publishing archives the new version durably first and then
/// swaps the handle in one atomic step. At most one publish runs at a
/// time.
pub struct ModelStore {
    archive: Arc<dyn ModelArchive>,
    /// Last successfully loaded or published active version
    active: RwLock<Option<Arc<ModelParameters>>>,
    /// Serializes publishes; never held while scoring
    publish_lock: Mutex<()>,
}

impl ModelStore {
    /// Creates a store over an archive with no model loaded yet
    pub fn new(archive: Arc<dyn ModelArchive>) -> Self {
        Self {
            archive,
            active: RwLock::new(None),
            publish_lock: Mutex::new(()),
        }
    }

    /// Creates a store and loads the active version from the archive
    pub async fn bootstrap(archive: Arc<dyn ModelArchive>) -> Result<Self, StoreError> {
        let store = Self::new(archive);
        match store.archive.fetch_active().await? {
            Some(parameters) => {
                store.install(Arc::new(parameters));
            }
            None => {
                info!("model archive holds no published version yet");
            }
        }
        Ok(store)
    }

    /// The active model snapshot
    ///
    /// Serves the last successfully loaded version. This deliberately
    /// tolerates transient archive unavailability: the snapshot only
    /// changes through `publish` or an explicit `refresh`.
    pub fn active(&self) -> Result<Arc<ModelParameters>, StoreError> {
        self.active
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .ok_or(StoreError::NoActiveModel)
    }

    /// Publishes a new model version
    ///
    /// The archive write happens first; only after it succeeds does the
    /// in-memory handle swap. A failed archive write leaves the previous
    /// version active and fully observable.
    pub async fn publish(
        &self,
        parameters: ModelParameters,
    ) -> Result<ModelVersionId, StoreError> {
        let _guard = self.publish_lock.lock().await;

        let version = parameters.version;
        self.archive.publish(&parameters).await?;
        self.install(Arc::new(parameters));

        info!(%version, "published model version");
        Ok(version)
    }

    /// Fetches a historical version from the archive
    pub async fn get(&self, version: ModelVersionId) -> Result<ModelParameters, StoreError> {
        self.archive
            .fetch(version)
            .await?
            .ok_or(StoreError::NotFound(version))
    }

    /// Re-reads the active version from the archive
    ///
    /// Unlike `active`, an unreachable archive surfaces as
    /// `StoreError::Unavailable` here; the snapshot is only replaced on
    /// success.
    pub async fn refresh(&self) -> Result<Arc<ModelParameters>, StoreError> {
        let parameters = self
            .archive
            .fetch_active()
            .await?
            .ok_or(StoreError::NoActiveModel)?;
        let snapshot = Arc::new(parameters);
        self.install(snapshot.clone());
        Ok(snapshot)
    }

    /// All published versions, oldest first
    pub async fn versions(&self) -> Result<Vec<ModelVersionId>, StoreError> {
        Ok(self.archive.versions().await?)
    }

    fn install(&self, snapshot: Arc<ModelParameters>) {
        let mut active = self
            .active
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *active = Some(snapshot);
    }
}
