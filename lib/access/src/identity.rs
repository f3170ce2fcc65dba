//! The authenticated caller resolved from session credentials.

use opsdeck_core::UserId;
use serde::{Deserialize, Serialize};

/// An authenticated caller, as reported by the identity provider.
///
/// An identity lives for a single request (or a single client-session
/// cache); nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-issued user id.
    id: UserId,
    /// E-mail address, when the provider knows one.
    email: Option<String>,
}

impl Identity {
    /// Creates an identity from provider claims.
    #[must_use]
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self { id, email }
    }

    /// Returns the provider-issued user id.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the e-mail address, if the provider reported one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the e-mail address folded to lowercase, for allow-list
    /// comparison.
    #[must_use]
    pub fn normalized_email(&self) -> Option<String> {
        self.email.as_deref().map(str::to_lowercase)
    }
}
