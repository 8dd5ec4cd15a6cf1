//! Health check endpoints.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable until the startup menu fetch has settled.
/// A menu that failed to load still counts as settled; the page renders its
/// unavailable state.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().snapshot().is_settled() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
