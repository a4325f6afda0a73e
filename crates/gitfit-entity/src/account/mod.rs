//! Account principal and credential types.

pub mod model;
pub mod secret;

pub use model::Account;
pub use secret::Secret;
