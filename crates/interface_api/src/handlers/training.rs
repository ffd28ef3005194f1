//! Training batch handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};

use core_kernel::Principal;
use domain_training::{CancellationFlag, RetrainError, TrainingBatch};

use crate::auth::permissions;
use crate::dto::training::{UploadBatchRequest, UploadBatchResponse};
use crate::error::ApiError;
use crate::AppState;

/// Uploads a labeled historical batch and retrains synchronously
///
/// Returns the batch's final status: `applied` with retrain statistics,
/// or `rejected` with per-record diagnostics. A rejected batch leaves the
/// active model untouched.
pub async fn upload_batch(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<UploadBatchRequest>,
) -> Result<Response, ApiError> {
    if !principal.has_role(permissions::BATCH_UPLOAD) {
        return Err(ApiError::Forbidden(format!(
            "missing role {}",
            permissions::BATCH_UPLOAD
        )));
    }

    let records = request.records.into_iter().map(Into::into).collect();
    let batch = TrainingBatch::new(records, &principal);
    let batch_id = batch.id;

    match state.coordinator.ingest(batch, &CancellationFlag::new()).await {
        Ok(outcome) => Ok((
            StatusCode::CREATED,
            Json(UploadBatchResponse::applied(batch_id, outcome)),
        )
            .into_response()),
        Err(RetrainError::BatchRejected {
            batch_id,
            diagnostics,
        }) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(UploadBatchResponse::rejected(batch_id, diagnostics)),
        )
            .into_response()),
        Err(other) => Err(ApiError::from(other)),
    }
}
