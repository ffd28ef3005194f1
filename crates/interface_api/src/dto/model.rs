//! Model info DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use core_kernel::ModelVersionId;
use domain_scoring::ModelParameters;

/// Transparency view of the active model
#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub version: ModelVersionId,
    pub trained_at: DateTime<Utc>,
    pub training_set_size: usize,
}

impl From<&ModelParameters> for ModelInfoResponse {
    fn from(parameters: &ModelParameters) -> Self {
        Self {
            version: parameters.version,
            trained_at: parameters.trained_at,
            training_set_size: parameters.training_set_size,
        }
    }
}
