//! Service status, liveness, and the JSON 404 fallback.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::config::APP_VERSION;

const ENDPOINTS: [(&str, &str); 5] = [
    ("/api/extract-facts", "POST - Extract facts from text"),
    ("/api/translate-persona", "POST - Translate with Aichan persona"),
    ("/api/translate", "POST - Full translation pipeline (1-3年生)"),
    ("/api/translate-4-6", "POST - Full translation pipeline (4-6年生)"),
    ("/api/translate-english", "POST - Full translation pipeline (English mode)"),
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
    pub api_key_configured: bool,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
    pub version: &'static str,
}

/// `GET /api/status` — endpoint map and whether a model key is configured.
pub async fn status(State(ctx): State<ApiContext>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "OK",
        service: "WakaLens Translation API",
        version: APP_VERSION,
        endpoints: ENDPOINTS.into_iter().collect(),
        api_key_configured: ctx.api_key_configured,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// `GET /health` — liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: "WakaLens API",
        version: APP_VERSION,
    })
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
