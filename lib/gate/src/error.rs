//! Gate error types.

use std::fmt;

/// Errors from constructing the gate client.
///
/// Resolution itself never errors: every failure resolves the gate to
/// "not admin" instead.
#[derive(Debug)]
pub enum GateError {
    /// The HTTP client could not be constructed.
    Configuration {
        /// Error details.
        details: String,
    },
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { details } => {
                write!(f, "gate client configuration error: {}", details)
            }
        }
    }
}

impl std::error::Error for GateError {}
