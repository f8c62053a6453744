//! Loop Commerce storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod supabase;

use axum::http::StatusCode;
use axum::{Router, extract::State, routing::get};

use crate::state::AppState;

/// Build the full application router with session support.
///
/// Sentry layers are added in `main`; tests exercise this router directly.
#[must_use]
pub fn build_app(state: AppState) -> Router {
    let session_layer = middleware::session::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::create_router())
        .layer(session_layer)
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the catalog store can serve products. Returns 503 if the
/// local cache is unusable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.catalog().get_products().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
