//! The access gate run ahead of every non-public route.
//!
//! Per-request state machine: public prefixes bypass the gate; everyone
//! else must resolve to an authenticated identity and pass the
//! same-origin admin check. Every other path denies, including an
//! unexpected failure anywhere in the check. Cookies rotated during
//! resolution ride on the response whatever the outcome.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::cookies;
use super::{AppState, ResolvedSession, SessionOutcome};

/// Denial reason carried to the login surface on a failed admin check.
const REASON_ACCESS_DENIED: &str = "access_denied";

#[derive(Debug, Deserialize)]
struct AdminCheckPayload {
    #[serde(rename = "isPlatformAdmin", default)]
    is_platform_admin: bool,
}

/// Result of the same-origin admin check.
enum AdminCheck {
    Allowed,
    Unauthenticated,
    Denied,
}

/// Runs the admin gate ahead of every non-public route.
pub async fn access_gate(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if is_public(&path, &state.config.access.public_prefixes()) {
        return next.run(request).await;
    }

    let ResolvedSession { outcome, jar } = state.resolver.resolve(jar).await;

    let identity = match outcome {
        SessionOutcome::Authenticated(identity) => identity,
        SessionOutcome::Anonymous => return login_redirect_next(jar, &path),
        SessionOutcome::Failed(error) => {
            warn!(error = %error, path = %path, "session resolution failed at the gate");
            return login_redirect_next(jar, &path);
        }
    };

    match admin_check(&state, &jar).await {
        AdminCheck::Allowed => {
            debug!(user_id = %identity.id(), path = %path, "gate allowed");
            let response = next.run(request).await;
            (jar, response).into_response()
        }
        AdminCheck::Unauthenticated => login_redirect_next(jar, &path),
        AdminCheck::Denied => login_redirect_error(jar, REASON_ACCESS_DENIED),
    }
}

/// Same-origin status-endpoint call, forwarding the merged cookies.
///
/// Only an explicit `isPlatformAdmin: true` allows; anything else
/// (a denial, a malformed payload, an unreachable endpoint) denies.
async fn admin_check(state: &Arc<AppState>, jar: &CookieJar) -> AdminCheck {
    let url = format!(
        "{}/api/qa/admin-check",
        state.config.public_base_url.trim_end_matches('/')
    );

    let mut request = state
        .gate_http
        .get(url)
        .header(header::ACCEPT, "application/json");

    let cookie_header = cookies::forward_header(jar);
    if !cookie_header.is_empty() {
        request = request.header(header::COOKIE, cookie_header);
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(error) => {
            warn!(error = %error, "admin check unreachable");
            return AdminCheck::Denied;
        }
    };

    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return AdminCheck::Unauthenticated;
    }
    if !status.is_success() {
        warn!(status = %status, "admin check rejected");
        return AdminCheck::Denied;
    }

    match response.json::<AdminCheckPayload>().await {
        Ok(payload) if payload.is_platform_admin => AdminCheck::Allowed,
        Ok(_) => AdminCheck::Denied,
        Err(error) => {
            warn!(error = %error, "admin check payload malformed");
            AdminCheck::Denied
        }
    }
}

/// Prefix match with a path-segment boundary, so `/api` covers
/// `/api/qa` but not `/apiary`.
fn is_public(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| {
        path == prefix
            || (path.starts_with(prefix.as_str()) && path[prefix.len()..].starts_with('/'))
    })
}

fn login_redirect_next(jar: CookieJar, path: &str) -> Response {
    let location = format!("/login?next={}", urlencoding::encode(path));
    (jar, Redirect::temporary(&location)).into_response()
}

fn login_redirect_error(jar: CookieJar, reason: &str) -> Response {
    (jar, Redirect::temporary(&format!("/login?error={reason}"))).into_response()
}
