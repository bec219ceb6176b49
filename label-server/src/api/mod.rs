//! API routes
//!
//! # Structure
//!
//! - [`labels`] - label form, print and preview
//! - [`health`] - health check

pub mod health;
pub mod labels;
pub mod page;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build the application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(labels::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
