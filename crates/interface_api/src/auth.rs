//! Authentication and authorization
//!
//! The engine does not manage users; it validates tokens issued by the
//! authentication collaborator and carries the subject as the opaque
//! audit principal.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::Principal;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User's roles
    pub roles: Vec<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    /// The audit principal carried by this token
    pub fn principal(&self) -> Principal {
        Principal::new(self.sub.clone(), self.roles.clone())
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing permission: {0}")]
    MissingPermission(String),
}

/// Creates a new JWT token
///
/// # Arguments
///
/// * `user_id` - User identifier
/// * `roles` - User's roles
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    user_id: &str,
    roles: Vec<String>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: user_id.to_string(),
        roles,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
///
/// # Arguments
///
/// * `token` - The JWT token to validate
/// * `secret` - JWT secret key
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

/// Permission definitions
pub mod permissions {
    pub const CLAIM_SCORE: &str = "claim:score";
    pub const CLAIM_READ: &str = "claim:read";
    pub const BATCH_UPLOAD: &str = "batch:upload";
    pub const MODEL_READ: &str = "model:read";
}
