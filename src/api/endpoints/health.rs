//! Liveness check.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::core_state::CoreState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model: String,
    pub credential_configured: bool,
}

/// `GET /health`
pub async fn check(State(core): State<Arc<CoreState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        model: core.model().to_string(),
        credential_configured: core.credential_configured(),
    })
}
