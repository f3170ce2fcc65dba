//! Public provider coordinates for browser clients.

use crate::auth::AppState;
use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use std::sync::Arc;

/// `GET /api/public-env`
///
/// The public coordinates a browser needs to bootstrap a sign-in:
/// backend URL and the publishable anonymous key. The privileged
/// service key is never exposed here.
pub async fn public_env(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "url": state.config.backend.url,
        "anonKey": state.config.backend.anon_key,
    }))
}
