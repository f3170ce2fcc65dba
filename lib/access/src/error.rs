//! Error types for access decisions.
//!
//! Expected negative outcomes (no session, not an admin) are modeled as
//! data, not errors; these variants cover everything else. Upper layers
//! convert them into fail-closed denials.

use std::fmt;

/// Errors from access-gate operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// No valid session accompanied the request.
    Unauthenticated,
    /// The caller is authenticated but is not a platform admin.
    Forbidden,
    /// Required server configuration is missing.
    ServerConfiguration {
        /// Which configuration concern is missing. For logs only;
        /// user-facing responses stay generic.
        missing: String,
    },
    /// The identity provider or the membership store failed.
    Upstream {
        /// Error details. For logs only.
        details: String,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "not authenticated"),
            Self::Forbidden => write!(f, "not a platform admin"),
            Self::ServerConfiguration { missing } => {
                write!(f, "server configuration error: {}", missing)
            }
            Self::Upstream { details } => {
                write!(f, "upstream failure: {}", details)
            }
        }
    }
}

impl std::error::Error for AccessError {}
