//! Authenticated principal identity
//!
//! The engine does not interpret identities beyond carrying them on audit
//! records; authentication itself is an external collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque authenticated identity attached to claim submissions and
/// training uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Subject identifier as issued by the authentication collaborator
    pub subject: String,
    /// Roles granted to the principal
    pub roles: Vec<String>,
}

impl Principal {
    /// Creates a principal from an authenticated subject
    pub fn new(subject: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            subject: subject.into(),
            roles,
        }
    }

    /// Principal used for engine-internal operations (startup bootstrap)
    pub fn system() -> Self {
        Self {
            subject: "system".to_string(),
            roles: vec![],
        }
    }

    /// Checks whether the principal carries a role (admins carry all)
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role || r == "admin")
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_role() {
        let p = Principal::new("analyst-1", vec!["claim:score".to_string()]);
        assert!(p.has_role("claim:score"));
        assert!(!p.has_role("batch:upload"));
    }

    #[test]
    fn test_admin_has_all_roles() {
        let p = Principal::new("ops-1", vec!["admin".to_string()]);
        assert!(p.has_role("batch:upload"));
        assert!(p.has_role("model:read"));
    }
}
