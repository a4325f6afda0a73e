//! Route definitions for the GitFit HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/accounts", post(handlers::account::create_account))
        .route("/accounts/me", get(handlers::account::me))
        .route("/accounts/rotate", post(handlers::account::rotate_secret))
        .route("/sessions", post(handlers::session::issue_session))
        .route("/sessions/verify", post(handlers::session::verify_session));

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);
    let timeout = TimeoutLayer::new(Duration::from_secs(
        state.config.server.request_timeout_seconds,
    ));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(timeout)
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}
