//! Extractors guarding admin-only API routes.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use opsdeck_access::Identity;
use std::sync::Arc;

use super::{AppState, ResolvedSession, SessionOutcome};
use crate::error::ApiError;

/// Extractor for requiring a platform-admin caller.
///
/// Runs session resolution and the admin classifier in sequence. The
/// jar travels with both success and rejection, so cookies rotated
/// during resolution reach the response either way.
pub struct RequireAdmin {
    /// The authenticated admin.
    pub identity: Identity,
    /// The request jar, including pending credential writes.
    pub jar: CookieJar,
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AdminRejection {
                jar: CookieJar::new(),
                error: ApiError::Upstream {
                    details: "cookie extraction failed".to_string(),
                },
            })?;

        let ResolvedSession { outcome, jar } = app_state.resolver.resolve(jar).await;

        let identity = match outcome {
            SessionOutcome::Authenticated(identity) => identity,
            SessionOutcome::Anonymous => {
                return Err(AdminRejection {
                    jar,
                    error: ApiError::Unauthenticated,
                });
            }
            SessionOutcome::Failed(error) => {
                return Err(AdminRejection {
                    jar,
                    error: ApiError::Upstream {
                        details: error.to_string(),
                    },
                });
            }
        };

        match app_state.classifier.is_admin(&identity).await {
            Ok(true) => Ok(RequireAdmin { identity, jar }),
            Ok(false) => Err(AdminRejection {
                jar,
                error: ApiError::Forbidden,
            }),
            Err(error) => Err(AdminRejection {
                jar,
                error: error.into(),
            }),
        }
    }
}

/// Rejection carrying the refreshed cookie jar alongside the error.
pub struct AdminRejection {
    /// Pending credential writes to flush onto the response.
    pub jar: CookieJar,
    /// The error to serve.
    pub error: ApiError,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        (self.jar, self.error).into_response()
    }
}
