//! The uniform per-request authentication pipeline.
//!
//! Identical in every service: extract the credential from the transport
//! envelope, resolve it through [`KeyVerifier`], and, for session-scoped
//! operations, verify the session token under the resolved secret. The
//! secret is validated first — it is the cheapest check and the signing-
//! key source of truth for the token step.

use tracing::warn;

use gitfit_core::AccountId;
use gitfit_entity::Secret;

use crate::credential::parse_api_key_header;
use crate::error::{AuthError, CredentialError, TokenError};
use crate::token::{SessionClaims, SessionTokenCodec};
use crate::verifier::KeyVerifier;

/// Result of key-only authentication.
///
/// Carries the presented secret because it doubles as the signing key
/// for any session token issued within the same request.
#[derive(Debug)]
pub struct AuthenticatedKey {
    /// The resolved account.
    pub account_id: AccountId,
    /// The secret that resolved it.
    pub secret: Secret,
}

/// Result of full key-plus-token authentication.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    /// The resolved account.
    pub account_id: AccountId,
    /// The verified session claims.
    pub claims: SessionClaims,
}

/// Per-request pipeline over a key verifier and a token codec.
///
/// Stateless: any service instance can authenticate any request given
/// access to the account store. Every failure is terminal for the
/// request — nothing here retries.
pub struct RequestAuthenticator {
    verifier: KeyVerifier,
    codec: SessionTokenCodec,
}

impl RequestAuthenticator {
    /// Create an authenticator from its two layers.
    pub fn new(verifier: KeyVerifier, codec: SessionTokenCodec) -> Self {
        Self { verifier, codec }
    }

    /// The codec, for callers that issue tokens after authenticating.
    pub fn codec(&self) -> &SessionTokenCodec {
        &self.codec
    }

    /// Authenticate a standing-secret operation from the `Authorization`
    /// header value.
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
    ) -> Result<AuthenticatedKey, AuthError> {
        let header = match authorization {
            Some(value) => value,
            None => {
                warn!(event = "auth.key_missing", "request carried no Authorization header");
                return Err(CredentialError::Missing.into());
            }
        };

        let secret = parse_api_key_header(header)?;
        let account_id = self.verifier.verify(&secret).await?;

        Ok(AuthenticatedKey {
            account_id,
            secret: Secret::new(secret),
        })
    }

    /// Authenticate a session-scoped operation: the key pipeline first,
    /// then the token from the request payload.
    pub async fn authenticate_session(
        &self,
        authorization: Option<&str>,
        token: Option<&str>,
    ) -> Result<AuthenticatedSession, AuthError> {
        let key = self.authenticate(authorization).await?;

        let token = match token.filter(|t| !t.is_empty()) {
            Some(value) => value,
            None => {
                warn!(event = "auth.token_missing", account_id = %key.account_id, "session-scoped request carried no token");
                return Err(TokenError::Missing.into());
            }
        };

        let claims = self.codec.verify(&key.secret, token)?;
        Ok(AuthenticatedSession {
            account_id: key.account_id,
            claims,
        })
    }
}
