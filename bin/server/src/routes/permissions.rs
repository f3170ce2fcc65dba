//! The caller-facing permissions endpoint.

use crate::auth::{AppState, ResolvedSession, SessionOutcome};
use crate::error::ApiError;
use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use std::sync::Arc;

/// Payload for the caller's permissions.
#[derive(Debug, Serialize)]
pub struct PermissionsResponse {
    /// The caller's e-mail address, when known.
    pub email: Option<String>,
    /// Granted permission strings; contains `"platform:admin"` iff the
    /// role is `platform_admin`.
    pub permissions: Vec<&'static str>,
    /// The caller's role.
    pub role: &'static str,
}

/// `GET /api/v1/me/permissions`
///
/// Derived from the same admin decision as the status endpoint.
pub async fn my_permissions(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let ResolvedSession { outcome, jar } = state.resolver.resolve(jar).await;

    let identity = match outcome {
        SessionOutcome::Authenticated(identity) => identity,
        SessionOutcome::Anonymous => return (jar, ApiError::Unauthenticated).into_response(),
        SessionOutcome::Failed(error) => {
            return (
                jar,
                ApiError::Upstream {
                    details: error.to_string(),
                },
            )
                .into_response();
        }
    };

    match state.classifier.decide(&identity).await {
        Ok(decision) => {
            let role = decision.role();
            (
                jar,
                Json(PermissionsResponse {
                    email: decision.email().map(str::to_string),
                    permissions: role.permissions(),
                    role: role.as_str(),
                }),
            )
                .into_response()
        }
        Err(error) => (jar, ApiError::from(error)).into_response(),
    }
}
