//! HTTP API Layer
//!
//! This crate provides the REST API for the claim scoring engine using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Claim scoring, training batch upload, model info
//! - **Middleware**: Authentication, audit logging, tracing
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_scoring::{ClaimPort, PredictionPort, ScoringService};
use domain_training::RetrainingCoordinator;
use model_store::ModelStore;

use crate::config::ApiConfig;
use crate::handlers::{claims, health, model, training};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ModelStore>,
    pub claims: Arc<dyn ClaimPort>,
    pub predictions: Arc<dyn PredictionPort>,
    pub coordinator: Arc<RetrainingCoordinator>,
    pub scoring: Arc<ScoringService>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Claim scoring routes
    let claims_routes = Router::new()
        .route("/", post(claims::submit_claim))
        .route("/:id/predictions", get(claims::list_predictions))
        .route("/:id/rescore", post(claims::rescore_claim));

    // Training routes
    let training_routes = Router::new().route("/batches", post(training::upload_batch));

    // Model routes
    let model_routes = Router::new()
        .route("/", get(model::model_info))
        .route("/refresh", post(model::refresh_model));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/training", training_routes)
        .nest("/model", model_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
