//! Authentication failure taxonomy.
//!
//! Tagged variants rather than an exception-class hierarchy: callers
//! dispatch by kind with exhaustive matches. Every failure here is
//! terminal for the request it occurred in. Messages stay coarse on
//! purpose — they must not disclose which verification step rejected a
//! credential beyond its category.

use thiserror::Error;

use gitfit_core::AppError;

/// Failures of the long-lived API key credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// No credential was presented.
    #[error("API key is required but was not provided")]
    Missing,
    /// A credential was presented but its encoding does not match
    /// `ApiKey <base64>`.
    #[error("the provided API key is not valid")]
    Malformed,
    /// A well-formed credential that matches no account.
    #[error("the provided API key is not valid")]
    Invalid,
}

/// Failures of the short-lived session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No token was presented for a session-scoped operation.
    #[error("session token is required but was not provided")]
    Missing,
    /// Structural or algorithm-declaration problems.
    #[error("the provided session token is not valid")]
    Malformed,
    /// The HMAC signature does not verify under the presented secret.
    #[error("the provided session token is not valid")]
    SignatureInvalid,
    /// The token's lifetime has elapsed.
    #[error("the provided session token has expired")]
    Expired,
}

/// Top-level authentication error.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The API key layer rejected the request.
    #[error(transparent)]
    Credential(#[from] CredentialError),
    /// The session token layer rejected the request.
    #[error(transparent)]
    Token(#[from] TokenError),
    /// The account store could not be reached. The one class eligible
    /// for caller-side retry; never to be presented as a credential
    /// failure.
    #[error("account storage is unavailable")]
    StorageUnavailable(#[source] AppError),
    /// An unexpected internal fault (serialization, key setup).
    #[error("internal authentication fault")]
    Internal(#[source] AppError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_and_invalid_share_client_message() {
        // Coarse category only: a probing client cannot tell a decode
        // failure from an unknown key.
        assert_eq!(
            CredentialError::Malformed.to_string(),
            CredentialError::Invalid.to_string()
        );
        assert_eq!(
            TokenError::Malformed.to_string(),
            TokenError::SignatureInvalid.to_string()
        );
    }

    #[test]
    fn test_storage_failure_is_not_a_credential_failure() {
        let err = AuthError::StorageUnavailable(AppError::database("pool exhausted"));
        assert!(!matches!(err, AuthError::Credential(_)));
        assert!(!err.to_string().contains("API key"));
    }
}
