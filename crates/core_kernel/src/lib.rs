//! Core Kernel - Foundational types for the fraud scoring engine
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed identifiers for claims, predictions, model versions, and batches
//! - The opaque authenticated principal attached to submissions for audit
//! - The port error type shared by all storage adapters

pub mod error;
pub mod identifiers;
pub mod ports;
pub mod principal;

pub use error::CoreError;
pub use identifiers::{BatchId, ClaimId, ModelVersionId, PredictionId};
pub use ports::{DomainPort, PortError};
pub use principal::Principal;
