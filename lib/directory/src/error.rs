//! Directory error types.

use std::fmt;

/// Errors from directory operations.
#[derive(Debug)]
pub enum DirectoryError {
    /// Failed to reach the provider's admin API.
    Transport {
        /// Error details.
        details: String,
    },
    /// The admin API rejected or failed the listing call.
    Listing {
        /// HTTP status returned by the provider.
        status: u16,
    },
    /// The admin API response could not be decoded.
    Decode {
        /// Error details.
        details: String,
    },
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { details } => {
                write!(f, "failed to reach the admin listing API: {}", details)
            }
            Self::Listing { status } => {
                write!(f, "admin listing API returned status {}", status)
            }
            Self::Decode { details } => {
                write!(f, "failed to decode admin listing response: {}", details)
            }
        }
    }
}

impl std::error::Error for DirectoryError {}
