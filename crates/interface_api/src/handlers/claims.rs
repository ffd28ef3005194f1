//! Claim scoring handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{ClaimId, Principal};
use domain_scoring::PredictionRecord;

use crate::auth::permissions;
use crate::dto::claims::{PredictionResponse, SubmitClaimRequest};
use crate::error::ApiError;
use crate::AppState;

/// Submits and synchronously scores a claim
///
/// The claim and its prediction are persisted together; an encoding
/// failure scores nothing and persists nothing.
pub async fn submit_claim(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<(StatusCode, Json<PredictionResponse>), ApiError> {
    require_role(&principal, permissions::CLAIM_SCORE)?;
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let record = request
        .into_record()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let model = state.store.active()?;
    let assessment = state.scoring.assess(&record, &model)?;

    state.claims.save_claim(&record).await?;
    let prediction = PredictionRecord::new(record.id, model.version, &assessment, &principal);
    state.predictions.append_prediction(&prediction).await?;

    Ok((StatusCode::CREATED, Json(prediction.into())))
}

/// Re-scores a stored claim against the current active model
///
/// Appends a new prediction record; earlier records are left untouched.
pub async fn rescore_claim(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<PredictionResponse>), ApiError> {
    require_role(&principal, permissions::CLAIM_SCORE)?;

    let claim_id = ClaimId::from_uuid(id);
    let record = state.claims.get_claim(claim_id).await?;

    let model = state.store.active()?;
    let assessment = state.scoring.assess(&record, &model)?;

    let prediction = PredictionRecord::new(claim_id, model.version, &assessment, &principal);
    state.predictions.append_prediction(&prediction).await?;

    Ok((StatusCode::CREATED, Json(prediction.into())))
}

/// Scoring history of a claim, oldest first
pub async fn list_predictions(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PredictionResponse>>, ApiError> {
    require_role(&principal, permissions::CLAIM_READ)?;

    let claim_id = ClaimId::from_uuid(id);
    // 404 for unknown claims rather than an empty history.
    state.claims.get_claim(claim_id).await?;

    let predictions = state.predictions.predictions_for_claim(claim_id).await?;
    Ok(Json(predictions.into_iter().map(Into::into).collect()))
}

fn require_role(principal: &Principal, role: &str) -> Result<(), ApiError> {
    if principal.has_role(role) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!("missing role {role}")))
    }
}
