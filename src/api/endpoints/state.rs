//! JSON view of the analysis lifecycle.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::core_state::{AnalysisState, CoreState};

/// `GET /api/state`
pub async fn snapshot(State(core): State<Arc<CoreState>>) -> Result<Json<AnalysisState>, ApiError> {
    Ok(Json(core.snapshot()?))
}
