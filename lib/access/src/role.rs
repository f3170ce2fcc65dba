//! Role and permission types derived from the admin decision.
//!
//! The platform uses two levels of access: standard users, and platform
//! administrators with oversight of all users. The role is derived from
//! the admin decision on every request; it is never stored.

use serde::{Deserialize, Serialize};

/// Permission string granted to platform administrators.
pub const PLATFORM_ADMIN_PERMISSION: &str = "platform:admin";

/// Platform role of an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Standard user with no administrative capabilities.
    User,
    /// Platform administrator with oversight of all users.
    PlatformAdmin,
}

impl Role {
    /// Derives the role from an admin decision.
    #[must_use]
    pub fn from_admin_flag(is_admin: bool) -> Self {
        if is_admin { Self::PlatformAdmin } else { Self::User }
    }

    /// Returns true if this role has admin privileges.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::PlatformAdmin)
    }

    /// Returns the permission strings granted by this role.
    #[must_use]
    pub fn permissions(&self) -> Vec<&'static str> {
        match self {
            Self::User => Vec::new(),
            Self::PlatformAdmin => vec![PLATFORM_ADMIN_PERMISSION],
        }
    }

    /// Returns the wire name of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::PlatformAdmin => "platform_admin",
        }
    }
}
