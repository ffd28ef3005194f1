//! Model store errors

use thiserror::Error;

use core_kernel::{ModelVersionId, PortError};

/// Errors raised by the model store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persistence layer is unreachable. Callers must not treat this
    /// as an empty store; an explicit refresh surfaces it instead of
    /// silently serving a stale snapshot.
    #[error("Model store unavailable: {0}")]
    Unavailable(#[source] PortError),

    #[error("Model version not found: {0}")]
    NotFound(ModelVersionId),

    /// No model has been published yet; scoring cannot proceed.
    #[error("No active model version")]
    NoActiveModel,
}

impl From<PortError> for StoreError {
    fn from(err: PortError) -> Self {
        StoreError::Unavailable(err)
    }
}
