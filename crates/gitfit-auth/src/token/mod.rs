//! Session token claims and the HMAC-SHA-256 codec.

pub mod claims;
pub mod codec;

pub use claims::SessionClaims;
pub use codec::{IssuedToken, SessionTokenCodec};
