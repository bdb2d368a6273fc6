use axum::Json;
use axum::response::IntoResponse;
use chrono::Utc;
use serde_json::json;

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "client-registry",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
