//! Infrastructure Database Layer
//!
//! PostgreSQL adapters for the engine's storage ports, implemented with
//! SQLx behind the repository pattern: the domain layer sees only the
//! port traits, never the database.
//!
//! Queries are runtime-bound (no compile-time verification), so the crate
//! builds without a reachable database; the schema ships as embedded SQLx
//! migrations (`MIGRATOR`).
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PgClaimRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/fraudscore")).await?;
//! infra_db::MIGRATOR.run(&pool).await?;
//! let claims = PgClaimRepository::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::{
    PgClaimRepository, PgModelArchive, PgPredictionRepository, PgTrainingCorpusRepository,
};

/// Embedded schema migrations
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
