//! Last Light API — library target.
//!
//! Exposes the router, configuration and chat gateway adapter so that
//! integration tests can assemble the same application as `main.rs`.

pub mod config;
pub mod error;
pub mod gateway;
pub mod responders;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the full application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/games", routes::games::router())
        .nest("/api/v1/gateway", routes::gateway::router())
        .with_state(state)
}
