//! Strongly-typed identifiers for domain entities.
//!
//! User identifiers are issued by the hosted identity provider and are
//! opaque on this side: nothing here generates, parses, or orders them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a user, as issued by the identity provider.
///
/// Treated as an opaque string; equality is the only operation the
/// platform relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a user ID from a provider-issued string.
    #[must_use]
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
