use axum::Json;
use serde_json::{Value, json};

use crate::serde::iso_now;

/// Handler for `GET /healthz` — liveness probe.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": iso_now() }))
}

/// Handler for `GET /readyz` — readiness probe. A service holding external
/// connections should mount a check of its own instead.
pub async fn readyz() -> Json<Value> {
    Json(json!({ "status": "ready", "timestamp": iso_now() }))
}
