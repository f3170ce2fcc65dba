//! Admin-decision policy, resolved once at startup.

use crate::allow_list::AdminAllowList;
use crate::membership::MembershipStore;
use std::fmt;
use std::sync::Arc;

/// Which admin checks are active for this process.
///
/// Resolved once by the composition root and consumed uniformly by the
/// classifier, so every endpoint reaches the same decision the same
/// way. The allow-list is always active; the membership table joins in
/// only when a store is configured.
#[derive(Clone)]
pub enum AdminPolicy {
    /// Only the configuration-sourced e-mail allow-list is consulted.
    AllowListOnly {
        /// The active allow-list.
        allow_list: AdminAllowList,
    },
    /// The allow-list is consulted first, then the membership table.
    AllowListWithMembership {
        /// The active allow-list.
        allow_list: AdminAllowList,
        /// The persisted membership store.
        store: Arc<dyn MembershipStore>,
    },
}

impl AdminPolicy {
    /// Returns the active allow-list.
    #[must_use]
    pub fn allow_list(&self) -> &AdminAllowList {
        match self {
            Self::AllowListOnly { allow_list } | Self::AllowListWithMembership { allow_list, .. } => {
                allow_list
            }
        }
    }

    /// Returns the membership store, when one is active.
    #[must_use]
    pub fn membership_store(&self) -> Option<&Arc<dyn MembershipStore>> {
        match self {
            Self::AllowListOnly { .. } => None,
            Self::AllowListWithMembership { store, .. } => Some(store),
        }
    }

    /// Human-readable policy name, for startup logging.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::AllowListOnly { .. } => "allow-list",
            Self::AllowListWithMembership { .. } => "allow-list+membership",
        }
    }
}

impl fmt::Debug for AdminPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllowListOnly { allow_list } => f
                .debug_struct("AllowListOnly")
                .field("allow_list", allow_list)
                .finish(),
            Self::AllowListWithMembership { allow_list, .. } => f
                .debug_struct("AllowListWithMembership")
                .field("allow_list", allow_list)
                .finish_non_exhaustive(),
        }
    }
}
