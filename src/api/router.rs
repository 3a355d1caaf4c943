//! HTTP router: the claim page, its form submit, and the JSON surface.
//!
//! Layers (outermost first): request tracing → security headers → handler.

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::core_state::CoreState;

/// Build the application router around the shared state.
pub fn app_router(core: Arc<CoreState>) -> Router {
    Router::new()
        .route("/", get(endpoints::page::index))
        .route("/analyze", post(endpoints::page::submit))
        .route("/api/analyze", post(endpoints::analyze::analyze))
        .route("/api/state", get(endpoints::state::snapshot))
        .route("/health", get(endpoints::health::check))
        .with_state(core)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(TraceLayer::new_for_http())
}
