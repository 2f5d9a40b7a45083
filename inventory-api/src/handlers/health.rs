//! Health handler.

use axum::Json;
use chrono::Utc;

use crate::dto::HealthResponse;

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        time: Utc::now().to_rfc3339(),
        version: crate::VERSION.to_string(),
    })
}
