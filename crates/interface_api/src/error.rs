//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::PortError;
use domain_scoring::ScoringError;
use domain_training::RetrainError;
use model_store::StoreError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Scoring requested before any model version was published
    #[error("No active model: {0}")]
    NoActiveModel(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::NoActiveModel(msg) => (StatusCode::CONFLICT, "no_active_model", msg.clone()),
            ApiError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg.clone(),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
            ),
            ApiError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ScoringError> for ApiError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::Encoding(encoding) => ApiError::Validation(encoding.to_string()),
            ScoringError::ModelMismatch(detail) => {
                // Version skew between encoder and active model is an
                // operational fault, not a caller mistake.
                error!(detail = %detail, "encoder/model vocabulary mismatch");
                ApiError::Internal(format!("model configuration error: {detail}"))
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NoActiveModel => {
                ApiError::NoActiveModel("no model has been trained yet".to_string())
            }
            StoreError::NotFound(version) => ApiError::NotFound(format!("model version {version}")),
            StoreError::Unavailable(source) => ApiError::Unavailable(source.to_string()),
        }
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else if err.is_transient() {
            ApiError::Unavailable(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<RetrainError> for ApiError {
    fn from(err: RetrainError) -> Self {
        match err {
            RetrainError::EmptyBatch => ApiError::Validation(err.to_string()),
            // Rejected batches are rendered by the upload handler with
            // their diagnostics; reaching this conversion is a bug.
            RetrainError::BatchRejected { .. } => ApiError::Validation(err.to_string()),
            RetrainError::Cancelled => ApiError::Unavailable(err.to_string()),
            RetrainError::Fit(fit) => ApiError::Validation(fit.to_string()),
            RetrainError::Scoring(scoring) => ApiError::from(scoring),
            RetrainError::Store(store) => ApiError::from(store),
            RetrainError::Corpus(port) => ApiError::from(port),
            RetrainError::State(state) => ApiError::Internal(state.to_string()),
        }
    }
}
