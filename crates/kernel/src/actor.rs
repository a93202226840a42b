//! Identity on whose behalf a request is performed.

use uuid::Uuid;

/// Permission that passes every access check.
pub const ADMINISTER_SITE: &str = "administer site";

/// Actor context for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Account ID (Uuid::nil() for anonymous).
    pub id: Uuid,
    /// Account name ("anonymous" when not authenticated).
    pub name: String,
    /// Whether the actor presented valid credentials.
    pub authenticated: bool,
    /// Resolved permissions.
    pub permissions: Vec<String>,
}

impl Actor {
    /// Create an anonymous actor with the anonymous role's permissions.
    pub fn anonymous(permissions: Vec<String>) -> Self {
        Self {
            id: Uuid::nil(),
            name: "anonymous".to_string(),
            authenticated: false,
            permissions,
        }
    }

    /// Create an authenticated actor.
    pub fn authenticated(id: Uuid, name: impl Into<String>, permissions: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            authenticated: true,
            permissions,
        }
    }

    /// Check if the actor has a specific permission.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// Check if the actor is a site administrator.
    pub fn is_admin(&self) -> bool {
        self.has_permission(ADMINISTER_SITE)
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::anonymous(Vec::new())
    }
}
