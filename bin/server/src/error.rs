//! API error responses.
//!
//! One mapping from the error taxonomy to HTTP: JSON `{"error": ...}`
//! bodies with generic messages. Details stay in the log; a stack trace
//! never reaches a caller.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use opsdeck_access::AccessError;
use serde_json::json;

/// Error surface for the JSON API.
#[derive(Debug)]
pub enum ApiError {
    /// No valid session accompanied the request.
    Unauthenticated,
    /// Valid session, but the caller is not a platform admin.
    Forbidden,
    /// Required configuration is missing.
    ServerConfiguration,
    /// The identity provider or the membership store failed.
    Upstream {
        /// Error details, logged and never sent to the caller.
        details: String,
    },
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::ServerConfiguration | Self::Upstream { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::ServerConfiguration => "Server configuration error",
            Self::Upstream { .. } => "Server error",
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(error: AccessError) -> Self {
        match error {
            AccessError::Unauthenticated => Self::Unauthenticated,
            AccessError::Forbidden => Self::Forbidden,
            AccessError::ServerConfiguration { missing } => {
                tracing::error!(missing = %missing, "missing server configuration");
                Self::ServerConfiguration
            }
            AccessError::Upstream { details } => Self::Upstream { details },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Upstream { details } = &self {
            tracing::error!(details = %details, "upstream failure");
        }

        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}
