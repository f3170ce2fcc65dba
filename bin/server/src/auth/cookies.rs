//! Session credential cookies.
//!
//! The request's cookie jar is the single read/write capability for
//! credentials: the resolver reads tokens from it, rotated tokens are
//! written back into it, and every response path flushes it. No other
//! code touches the `Cookie`/`Set-Cookie` headers directly.

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Access-token cookie name.
pub const ACCESS_COOKIE: &str = "od_access_token";

/// Refresh-token cookie name.
pub const REFRESH_COOKIE: &str = "od_refresh_token";

/// How long a rotated refresh token stays valid on this side.
pub const REFRESH_MAX_AGE: Duration = Duration::days(30);

/// Builds a session cookie with the hardening flags every credential
/// cookie carries.
#[must_use]
pub fn session_cookie(
    name: &'static str,
    value: String,
    secure: bool,
    max_age: Duration,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

/// Builds a removal for a session cookie.
#[must_use]
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

/// Serializes the jar (request cookies overlaid with any pending
/// writes) into one `Cookie` header value for same-origin forwarding.
#[must_use]
pub fn forward_header(jar: &CookieJar) -> String {
    jar.iter()
        .map(|cookie| format!("{}={}", cookie.name(), cookie.value()))
        .collect::<Vec<_>>()
        .join("; ")
}
