//! Typed request extractors running the authentication pipeline.

pub mod auth;

pub use auth::{ApiKeyAuth, SessionAuth};
