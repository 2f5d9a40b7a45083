//! Scan token authentication middleware.
//!
//! Gates the fingerprint report behind a shared secret. The scanner may
//! send the token either in the `X-Scan-Token` header or as a bearer token
//! in `Authorization`. When no token is configured the gate rejects
//! everything; the report only exists for authenticated scanners.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ErrorResponse;
use crate::state::AppState;

/// Header the scanner sends the token in.
pub const SCAN_TOKEN_HEADER: &str = "x-scan-token";

/// Scan token configuration
#[derive(Debug, Clone, Default)]
pub struct ScanTokenConfig {
    token: Option<String>,
}

impl ScanTokenConfig {
    /// An empty or whitespace-only token counts as unset.
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Whether the request headers carry the expected token. An unset
    /// server token never matches.
    pub fn accepts(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = &self.token else {
            return false;
        };
        let scan_header = headers
            .get(SCAN_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());
        if scan_header == Some(expected.as_str()) {
            return true;
        }
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|auth| auth == format!("Bearer {expected}"))
            .unwrap_or(false)
    }
}

/// Middleware rejecting requests without a valid scan token.
pub async fn require_scan_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.scan_token.accepts(request.headers()) {
        tracing::warn!(path = %request.uri().path(), "scan token rejected");
        let body = ErrorResponse {
            code: "UNAUTHORIZED".to_string(),
            message: "Auth required".to_string(),
        };
        return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    }
    next.run(request).await
}
