//! FraudScore Core - API Server Binary
//!
//! This binary starts the HTTP API server for the claim scoring engine.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin fraudscore-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 DATABASE_URL=postgres://... cargo run --bin fraudscore-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret (required in production)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_DECISION_THRESHOLD` - Fraud decision boundary (default: 0.5)
//! * `API_SMOOTHING` - Laplace smoothing constant (default: 1.0)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_scoring::{RuleAdjustments, ScoringService};
use domain_training::RetrainingCoordinator;
use infra_db::{
    create_pool_from_url, PgClaimRepository, PgModelArchive, PgPredictionRepository,
    PgTrainingCorpusRepository,
};
use interface_api::{config::ApiConfig, create_router, AppState};
use model_store::ModelStore;

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, establishes the database
/// connection, bootstraps the model store from the archive, and starts
/// the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = load_config();

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting FraudScore Core API Server"
    );

    // Create database connection pool and apply migrations
    let pool = create_pool_from_url(&config.database_url).await?;
    tracing::info!("Running database migrations...");
    infra_db::MIGRATOR.run(&pool).await?;
    tracing::info!("Database ready");

    // Wire the storage adapters
    let claims = Arc::new(PgClaimRepository::new(pool.clone()));
    let predictions = Arc::new(PgPredictionRepository::new(pool.clone()));
    let corpus = Arc::new(PgTrainingCorpusRepository::new(pool.clone()));
    let archive = Arc::new(PgModelArchive::new(pool));

    // Load the active model version, if one has been published
    let store = Arc::new(ModelStore::bootstrap(archive).await?);
    match store.active() {
        Ok(model) => tracing::info!(version = %model.version, "loaded active model"),
        Err(_) => tracing::info!("no active model yet; scoring disabled until first retrain"),
    }

    let coordinator = Arc::new(RetrainingCoordinator::new(
        store.clone(),
        corpus,
        config.training_config(),
    ));
    let scoring = Arc::new(ScoringService::new(
        config.risk_policy()?,
        RuleAdjustments::default(),
    ));

    let state = AppState {
        store,
        claims,
        predictions,
        coordinator,
        scoring,
        config: config.clone(),
    };

    // Create the API router
    let app = create_router(state);

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to default values if environment variables are not set.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| ApiConfig {
        host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        port: std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080),
        jwt_secret: std::env::var("API_JWT_SECRET")
            .unwrap_or_else(|_| "dev-secret-change-in-production".to_string()),
        database_url: std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("API_DATABASE_URL"))
            .unwrap_or_else(|_| "postgres://localhost/fraudscore".to_string()),
        log_level: std::env::var("API_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string()),
        ..ApiConfig::default()
    })
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
