//! HTTP routes for the opsdeck server.

pub mod admin_check;
pub mod health;
pub mod login;
pub mod permissions;
pub mod public_env;
pub mod users;

use crate::auth::{self, AppState};
use axum::response::Html;
use axum::routing::get;
use axum::{Router, middleware};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Assembles the full router with the access gate ahead of it.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/login", get(login::login_page))
        .route("/healthz", get(health::healthz))
        .route("/api/public-env", get(public_env::public_env))
        .route("/api/qa/admin-check", get(admin_check::admin_check))
        .route("/api/v1/me/permissions", get(permissions::my_permissions))
        .route("/api/admin/users", get(users::list_users))
        .route("/api/admin/users/count", get(users::count_users))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::access_gate,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /`, the protected console shell.
///
/// The real dashboard UI is served separately; the gate in front of
/// this route is what matters here.
async fn home() -> Html<&'static str> {
    Html("<!doctype html><title>Opsdeck</title><h1>Opsdeck admin console</h1>")
}
