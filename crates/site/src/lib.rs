//! Trattoria site library.
//!
//! This crate provides the restaurant site as a library, allowing it to be
//! tested and reused. The binary in `main.rs` only loads configuration, sets
//! up tracing and Sentry, and serves [`app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carts;
pub mod config;
pub mod error;
pub mod filters;
pub mod menu;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{Router, extract::Request};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Browser client entry point, produced by `cargo xtask build-web` under
/// `static/pkg`.
pub const WEB_BUNDLE_PATH: &str = "/static/pkg/trattoria_web.js";

/// Build the full application router with its middleware stack.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::csp_nonce_middleware))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
