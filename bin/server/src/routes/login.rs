//! The login surface: the redirect target for gate denials.

use axum::extract::Query;
use axum::response::Html;
use serde::Deserialize;

/// Query parameters attached by the access gate.
#[derive(Debug, Default, Deserialize)]
pub struct LoginParams {
    /// Path to return to after signing in.
    #[serde(default)]
    pub next: Option<String>,
    /// Denial reason, when the gate turned the caller away.
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /login`
///
/// A minimal public login surface. The sign-in UI itself is served
/// separately; this page only surfaces the denial reason. Query values
/// are matched against known reasons, never echoed into the markup.
pub async fn login_page(Query(params): Query<LoginParams>) -> Html<String> {
    let notice = match params.error.as_deref() {
        Some("access_denied") => "<p>Access denied: your account is not a platform admin.</p>",
        Some(_) => "<p>Sign-in failed. Try again.</p>",
        None => "",
    };

    Html(format!(
        "<!doctype html><title>Opsdeck sign in</title><h1>Sign in</h1>{notice}"
    ))
}
