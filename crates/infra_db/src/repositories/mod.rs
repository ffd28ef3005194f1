//! Repository implementations of the engine's storage ports

mod claims;
mod models;
mod predictions;
mod training;

pub use claims::PgClaimRepository;
pub use models::PgModelArchive;
pub use predictions::PgPredictionRepository;
pub use training::PgTrainingCorpusRepository;

use core_kernel::PortError;

use crate::error::DatabaseError;

/// Maps an SQLx failure onto the port error contract
pub(crate) fn port_error(error: sqlx::Error) -> PortError {
    PortError::from(DatabaseError::from(error))
}
