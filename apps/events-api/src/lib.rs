//! Events API
//!
//! HTTP backend where authenticated users schedule events. Storage is MongoDB,
//! or in-memory maps when `TESTING` is set.

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use axum::Router;
use axum_helpers::{create_router, health_router};

use state::AppState;

/// The complete application: API routes, `/health`, `/ready` and the
/// documentation UIs.
pub fn app(state: &AppState) -> Router {
    let routes = api::routes(state).merge(health_router(state.config.app));
    create_router(routes, openapi::openapi())
}
