use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Always `{"status": "ok"}`; does not touch the model provider or telemetry.
pub async fn health_handler() -> Json<Value> {
    tracing::debug!("Health check endpoint called");
    Json(json!({ "status": "ok" }))
}
