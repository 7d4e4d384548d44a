//! Health Check Handler

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::infrastructure::driving_adapters::api_rest::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// GET /health - Liveness probe
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
