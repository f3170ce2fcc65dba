//! Liveness probe.

use axum::Json;
use serde_json::{Value, json};

/// `GET /healthz`
///
/// Public liveness probe; does not touch the provider or the database.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
