//! # gitfit-core
//!
//! Core crate for the GitFit platform. Contains configuration schemas,
//! the typed account identifier, collaborator traits, and the unified
//! error system shared by every service crate.
//!
//! This crate has **no** internal dependencies on other GitFit crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
pub use types::AccountId;
