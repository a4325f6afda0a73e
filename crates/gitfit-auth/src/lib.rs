//! # gitfit-auth
//!
//! The authentication core shared by every GitFit service.
//!
//! Two credential layers: a long-lived opaque secret issued once per
//! account, and short-lived signed session tokens whose HMAC signing key
//! *is* that same per-account secret. Rotating the secret therefore
//! invalidates every outstanding token for the account without any
//! revocation list.
//!
//! ## Modules
//!
//! - `error` — the tagged credential/token failure taxonomy
//! - `store` — the `AccountStore` port the core consumes
//! - `secret` — opaque secret generation and rotation
//! - `credential` — strict `Authorization: ApiKey <base64>` header parsing
//! - `verifier` — secret-to-account resolution
//! - `token` — session token claims and the HMAC-SHA-256 codec
//! - `authenticator` — the uniform per-request pipeline

pub mod authenticator;
pub mod credential;
pub mod error;
pub mod secret;
pub mod store;
pub mod token;
pub mod verifier;

pub use authenticator::{AuthenticatedKey, AuthenticatedSession, RequestAuthenticator};
pub use error::{AuthError, CredentialError, TokenError};
pub use secret::SecretIssuer;
pub use store::AccountStore;
pub use token::{IssuedToken, SessionClaims, SessionTokenCodec};
pub use verifier::KeyVerifier;
