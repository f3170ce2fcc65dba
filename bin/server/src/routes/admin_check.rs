//! The admin status endpoint, consumed by the edge gate and UI guards.

use crate::auth::{AppState, ResolvedSession, SessionOutcome};
use crate::error::ApiError;
use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use std::sync::Arc;

/// Payload for a resolved admin check.
#[derive(Debug, Serialize)]
pub struct AdminCheckResponse {
    /// Whether the caller is a platform admin.
    #[serde(rename = "isPlatformAdmin")]
    pub is_platform_admin: bool,
    /// The caller's e-mail address, when known.
    pub email: Option<String>,
}

/// `GET /api/qa/admin-check`
///
/// Resolves the session, classifies it, and reports the decision.
/// Repeated calls with an unchanged session yield an identical payload.
/// Credentials rotated during resolution ride on the response in every
/// case, including errors.
pub async fn admin_check(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
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
        Ok(decision) => (
            jar,
            Json(AdminCheckResponse {
                is_platform_admin: decision.is_admin(),
                email: decision.email().map(str::to_string),
            }),
        )
            .into_response(),
        Err(error) => (jar, ApiError::from(error)).into_response(),
    }
}
