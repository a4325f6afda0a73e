//! # gitfit-api
//!
//! HTTP layer for the GitFit platform, built on Axum. Every service
//! mounts the same authentication pipeline: the `ApiKeyAuth` and
//! `SessionAuth` extractors run the shared `RequestAuthenticator` before
//! any handler logic.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
