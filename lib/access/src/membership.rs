//! Persisted admin-membership lookups.

use async_trait::async_trait;
use opsdeck_core::UserId;
use std::fmt;

/// Error from a membership-store lookup.
///
/// A missing row is not an error; this type is reserved for backend
/// failures (network, database), which callers must fail closed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipError {
    /// Error details.
    pub details: String,
}

impl fmt::Display for MembershipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "membership lookup failed: {}", self.details)
    }
}

impl std::error::Error for MembershipError {}

/// Read-only access to the admin-membership table.
///
/// The existence of a row for a user id marks that user as a platform
/// admin. Rows are granted and revoked out of band; nothing behind this
/// trait mutates them.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Returns true if a membership row exists for the given user id.
    ///
    /// # Errors
    ///
    /// Returns `MembershipError` when the store cannot be consulted.
    /// "No row" is `Ok(false)`, never an error.
    async fn is_member(&self, user_id: &UserId) -> Result<bool, MembershipError>;
}
