//! Ports and Adapters Infrastructure
//!
//! The engine talks to durable storage exclusively through port traits.
//! Each domain defines its own port trait extending the marker here;
//! adapters (PostgreSQL in `infra_db`, in-memory in `test_utils`)
//! implement those traits.
//!
//! ```rust,ignore
//! // In domain_scoring/src/ports.rs
//! #[async_trait]
//! pub trait ClaimPort: DomainPort {
//!     async fn save_claim(&self, claim: &ClaimRecord) -> Result<(), PortError>;
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Provides a unified error type that all port implementations must use,
/// ensuring consistent error handling across adapters.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The storage system is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a ServiceUnavailable error
    pub fn unavailable(service: impl Into<String>) -> Self {
        PortError::ServiceUnavailable {
            service: service.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. } | PortError::ServiceUnavailable { .. }
        )
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits should extend this marker to ensure they are
/// thread-safe and can be used in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("ModelParameters", "MDL-123");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert!(error.to_string().contains("ModelParameters"));
        assert!(error.to_string().contains("MDL-123"));
    }

    #[test]
    fn test_port_error_transient() {
        let unavailable = PortError::unavailable("model archive");
        assert!(unavailable.is_transient());

        let validation = PortError::validation("label missing");
        assert!(!validation.is_transient());
    }
}
