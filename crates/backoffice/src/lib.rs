//! Staybook back-office library.
//!
//! This crate provides the back-office functionality as a library,
//! allowing it to be tested and reused (the integration-test harness and
//! the CLI both build on it).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod coordinator;
pub mod error;
pub mod routes;
pub mod state;
pub mod stay;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the full application router over the given state.
///
/// Exposed so the integration-test harness can serve the exact router the
/// binary runs, minus process-level layers.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the Stay API.
async fn health() -> &'static str {
    "ok"
}
