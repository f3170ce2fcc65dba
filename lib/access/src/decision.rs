//! The derived, per-request access decision.

use crate::role::Role;
use serde::{Deserialize, Serialize};

/// Result of classifying a request.
///
/// Recomputed on every request; never cached across requests. The only
/// permitted cache is a single client-side session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    authenticated: bool,
    is_admin: bool,
    email: Option<String>,
}

impl AccessDecision {
    /// Decision for a request with no valid session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            is_admin: false,
            email: None,
        }
    }

    /// Decision for an authenticated caller without admin access.
    #[must_use]
    pub fn member(email: Option<String>) -> Self {
        Self {
            authenticated: true,
            is_admin: false,
            email,
        }
    }

    /// Decision for an authenticated platform administrator.
    #[must_use]
    pub fn admin(email: Option<String>) -> Self {
        Self {
            authenticated: true,
            is_admin: true,
            email,
        }
    }

    /// Returns true if the caller carried a valid session.
    #[must_use]
    pub fn authenticated(&self) -> bool {
        self.authenticated
    }

    /// Returns true if the caller is a platform admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Returns the caller's e-mail address, if known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the role implied by this decision.
    #[must_use]
    pub fn role(&self) -> Role {
        Role::from_admin_flag(self.is_admin)
    }
}
