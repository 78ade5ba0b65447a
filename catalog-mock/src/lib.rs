//! Catalog Mock - in-memory stand-in for the catalog admin API
//!
//! Serves `/api/v1` with the same envelopes, status codes and list shapes
//! as the real backend so the admin client can be exercised end to end.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::MockConfig;
pub use error::{AppError, AppResult};
pub use state::{MockState, SharedState};

/// Base path of every route
pub const API_PREFIX: &str = "/api/v1";

/// Full application router
pub fn router(state: SharedState) -> Router {
    Router::new()
        .nest(API_PREFIX, api::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
