//! Model archive port
//!
//! Durable storage for published model versions. Implementations must make
//! `publish` atomic: the version is either fully persisted and marked
//! active, or the previously active version remains active.

use async_trait::async_trait;

use core_kernel::{DomainPort, ModelVersionId, PortError};
use domain_scoring::ModelParameters;

/// Durable, append-only storage of model versions
#[async_trait]
pub trait ModelArchive: DomainPort {
    /// Durably stores a new version and marks it active, atomically
    async fn publish(&self, parameters: &ModelParameters) -> Result<(), PortError>;

    /// Fetches a specific version
    async fn fetch(&self, version: ModelVersionId)
        -> Result<Option<ModelParameters>, PortError>;

    /// Fetches the currently active version, if any has been published
    async fn fetch_active(&self) -> Result<Option<ModelParameters>, PortError>;

    /// All published version ids, oldest first
    async fn versions(&self) -> Result<Vec<ModelVersionId>, PortError>;
}
