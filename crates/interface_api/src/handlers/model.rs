//! Model transparency handlers

use axum::{extract::State, Extension, Json};

use core_kernel::Principal;

use crate::auth::permissions;
use crate::dto::model::ModelInfoResponse;
use crate::error::ApiError;
use crate::AppState;

/// Information about the active model version
pub async fn model_info(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ModelInfoResponse>, ApiError> {
    require_role(&principal, permissions::MODEL_READ)?;
    let model = state.store.active()?;
    Ok(Json(ModelInfoResponse::from(model.as_ref())))
}

/// Explicitly re-reads the active model from the archive
///
/// Unlike scoring, which tolerates a stale snapshot during transient
/// outages, an explicit refresh surfaces archive unavailability as 503.
pub async fn refresh_model(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ModelInfoResponse>, ApiError> {
    require_role(&principal, permissions::MODEL_READ)?;
    let model = state.store.refresh().await?;
    Ok(Json(ModelInfoResponse::from(model.as_ref())))
}

fn require_role(principal: &Principal, role: &str) -> Result<(), ApiError> {
    if principal.has_role(role) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!("missing role {role}")))
    }
}
