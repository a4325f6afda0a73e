//! Issuing and verifying signed, time-bound session tokens.
//!
//! Token wire shape: `base64url(header) . base64url(claims) .
//! base64url(signature)` with the padding-free URL-safe alphabet. The
//! header declares exactly one algorithm; the signature is
//! `HMAC-SHA256(header || "." || claims)` keyed by the account's opaque
//! secret. The secret never appears inside the token — it only
//! parameterizes the signature, so a captured token is useless without
//! the secret that signed it.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::Sha256;

use gitfit_core::{AccountId, AppError};
use gitfit_core::config::auth::AuthConfig;
use gitfit_entity::Secret;

use crate::error::{AuthError, TokenError};

use super::claims::SessionClaims;

type HmacSha256 = Hmac<Sha256>;

/// The single fixed signing algorithm. Never negotiated: a token
/// declaring anything else is rejected outright.
const TOKEN_ALGORITHM: &str = "HS256";

const TOKEN_TYPE: &str = "JWT";

/// Fixed token header.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenHeader {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

impl TokenHeader {
    fn fixed() -> Self {
        Self {
            alg: TOKEN_ALGORITHM.to_string(),
            typ: Some(TOKEN_TYPE.to_string()),
        }
    }
}

/// A freshly issued token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The compact three-segment token string.
    pub token: String,
    /// The claims that were signed into it.
    pub claims: SessionClaims,
}

/// Issues and verifies session tokens keyed by per-account secrets.
#[derive(Debug, Clone)]
pub struct SessionTokenCodec {
    ttl_seconds: u64,
}

impl SessionTokenCodec {
    /// Create a codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            ttl_seconds: config.session_ttl_seconds,
        }
    }

    /// The configured session lifetime in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Issue a token for `account_id`, signed with its current secret.
    pub fn issue(
        &self,
        account_id: AccountId,
        secret: &Secret,
        extra_claims: Map<String, Value>,
    ) -> Result<IssuedToken, AuthError> {
        self.issue_at(account_id, secret, extra_claims, Utc::now())
    }

    /// Deterministic variant of [`issue`](Self::issue) with an explicit
    /// issuance instant.
    pub fn issue_at(
        &self,
        account_id: AccountId,
        secret: &Secret,
        extra_claims: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let claims = SessionClaims::new(account_id, now, self.ttl_seconds, extra_claims);

        let header_json = serde_json::to_vec(&TokenHeader::fixed()).map_err(internal)?;
        let claims_json = serde_json::to_vec(&claims).map_err(internal)?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header_json),
            URL_SAFE_NO_PAD.encode(claims_json)
        );
        let mut mac = new_mac(secret)?;
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();

        let token = format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature));
        Ok(IssuedToken { token, claims })
    }

    /// Verify `token` against the independently presented `secret`.
    ///
    /// Steps run in a fixed order, each short-circuiting: structure,
    /// declared algorithm, signature (constant-time compare), expiry.
    /// Claims bytes are only parsed after the signature over them has
    /// verified; there is no unverified-decode path.
    pub fn verify(&self, secret: &Secret, token: &str) -> Result<SessionClaims, AuthError> {
        self.verify_at(secret, token, Utc::now())
    }

    /// Deterministic variant of [`verify`](Self::verify) with an explicit
    /// verification instant.
    pub fn verify_at(
        &self,
        secret: &Secret,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionClaims, AuthError> {
        let mut segments = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed.into());
        };
        if header_b64.is_empty() || claims_b64.is_empty() || signature_b64.is_empty() {
            return Err(TokenError::Malformed.into());
        }

        let header_json = URL_SAFE_NO_PAD
            .decode(header_b64)
            .map_err(|_| TokenError::Malformed)?;
        let header: TokenHeader =
            serde_json::from_slice(&header_json).map_err(|_| TokenError::Malformed)?;
        if header.alg != TOKEN_ALGORITHM {
            return Err(TokenError::Malformed.into());
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;
        let mut mac = new_mac(secret)?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        // Constant-time comparison.
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::SignatureInvalid)?;

        let claims_json = URL_SAFE_NO_PAD
            .decode(claims_b64)
            .map_err(|_| TokenError::Malformed)?;
        let claims: SessionClaims =
            serde_json::from_slice(&claims_json).map_err(|_| TokenError::Malformed)?;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired.into());
        }

        Ok(claims)
    }
}

fn new_mac(secret: &Secret) -> Result<HmacSha256, AuthError> {
    HmacSha256::new_from_slice(secret.expose().as_bytes())
        .map_err(|_| AuthError::Internal(AppError::internal("HMAC key setup failed")))
}

fn internal(err: serde_json::Error) -> AuthError {
    AuthError::Internal(AppError::from(err))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn codec(ttl_seconds: u64) -> SessionTokenCodec {
        SessionTokenCodec::new(&AuthConfig { session_ttl_seconds: ttl_seconds })
    }

    fn at(ts: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(ts, 0).unwrap()
    }

    fn assert_invalid_token(result: Result<SessionClaims, AuthError>) {
        match result {
            Err(AuthError::Token(TokenError::Malformed | TokenError::SignatureInvalid)) => {}
            other => panic!("expected invalid-token failure, got {other:?}"),
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let codec = codec(3600);
        let secret = Secret::new("per-account-signing-secret");
        let mut extra = Map::new();
        extra.insert("device".to_string(), serde_json::json!("watch"));

        let issued = codec
            .issue_at(AccountId(42), &secret, extra, at(10_000))
            .expect("issue");
        let claims = codec
            .verify_at(&secret, &issued.token, at(10_001))
            .expect("verify");

        assert_eq!(claims, issued.claims);
        assert_eq!(claims.account_id, AccountId(42));
        assert_eq!(claims.expires_at, 13_600);
        assert_eq!(claims.extra["device"], serde_json::json!("watch"));
    }

    #[test]
    fn test_token_never_contains_the_secret() {
        let codec = codec(3600);
        let secret = Secret::new("per-account-signing-secret");
        let issued = codec
            .issue_at(AccountId(1), &secret, Map::new(), at(10_000))
            .expect("issue");
        assert!(!issued.token.contains(secret.expose()));
    }

    #[test]
    fn test_expiry_boundary() {
        let codec = codec(60);
        let secret = Secret::new("per-account-signing-secret");
        let issued = codec
            .issue_at(AccountId(1), &secret, Map::new(), at(10_000))
            .expect("issue");

        assert!(codec.verify_at(&secret, &issued.token, at(10_059)).is_ok());
        for now in [10_060, 10_061, 20_000] {
            let err = codec
                .verify_at(&secret, &issued.token, at(now))
                .expect_err("expired");
            assert!(matches!(err, AuthError::Token(TokenError::Expired)));
        }
    }

    #[test]
    fn test_rotation_invalidates_outstanding_tokens() {
        let codec = codec(3600);
        let old_secret = Secret::new("secret-before-rotation");
        let new_secret = Secret::new("secret-after-rotation");

        let issued = codec
            .issue_at(AccountId(1), &old_secret, Map::new(), at(10_000))
            .expect("issue");

        // Claims and structure untouched, but the key on record changed.
        let err = codec
            .verify_at(&new_secret, &issued.token, at(10_001))
            .expect_err("rotated");
        assert!(matches!(
            err,
            AuthError::Token(TokenError::SignatureInvalid)
        ));
    }

    #[test]
    fn test_cross_account_tokens_do_not_verify() {
        let codec = codec(3600);
        let secret_a = Secret::new("secret-of-account-a");
        let secret_b = Secret::new("secret-of-account-b");

        let token_a = codec
            .issue_at(AccountId(1), &secret_a, Map::new(), at(10_000))
            .expect("issue a");
        let token_b = codec
            .issue_at(AccountId(2), &secret_b, Map::new(), at(10_000))
            .expect("issue b");

        assert!(codec.verify_at(&secret_a, &token_a.token, at(10_001)).is_ok());
        assert!(codec.verify_at(&secret_b, &token_b.token, at(10_001)).is_ok());
        assert_invalid_token(codec.verify_at(&secret_a, &token_b.token, at(10_001)));
        assert_invalid_token(codec.verify_at(&secret_b, &token_a.token, at(10_001)));
    }

    #[test]
    fn test_any_claims_bit_flip_breaks_verification() {
        let codec = codec(3600);
        let secret = Secret::new("per-account-signing-secret");
        let other_secret = Secret::new("some-other-secret");
        let issued = codec
            .issue_at(AccountId(1), &secret, Map::new(), at(10_000))
            .expect("issue");

        let parts: Vec<&str> = issued.token.split('.').collect();
        let claims_segment = parts[1].as_bytes();

        for byte_index in 0..claims_segment.len() {
            for bit in 0..8 {
                let mut tampered = claims_segment.to_vec();
                tampered[byte_index] ^= 1 << bit;
                let tampered_token = format!(
                    "{}.{}.{}",
                    parts[0],
                    String::from_utf8_lossy(&tampered),
                    parts[2]
                );
                // Fails for the signer's secret and for every other one.
                assert_invalid_token(codec.verify_at(&secret, &tampered_token, at(10_001)));
                assert_invalid_token(codec.verify_at(
                    &other_secret,
                    &tampered_token,
                    at(10_001),
                ));
            }
        }
    }

    #[test]
    fn test_declared_algorithm_must_match_the_fixed_one() {
        let codec = codec(3600);
        let secret = Secret::new("per-account-signing-secret");
        let issued = codec
            .issue_at(AccountId(1), &secret, Map::new(), at(10_000))
            .expect("issue");
        let parts: Vec<&str> = issued.token.split('.').collect();

        for alg in ["none", "HS512", "RS256", ""] {
            let header = URL_SAFE_NO_PAD
                .encode(serde_json::to_vec(&serde_json::json!({"alg": alg, "typ": "JWT"})).unwrap());
            let forged = format!("{header}.{}.{}", parts[1], parts[2]);
            // Rejected before any signature computation — never a silent
            // fall back to "no verification".
            assert_invalid_token(codec.verify_at(&secret, &forged, at(10_001)));
        }
    }

    #[test]
    fn test_structural_malformation_is_rejected() {
        let codec = codec(3600);
        let secret = Secret::new("per-account-signing-secret");
        let issued = codec
            .issue_at(AccountId(1), &secret, Map::new(), at(10_000))
            .expect("issue");
        let parts: Vec<&str> = issued.token.split('.').collect();

        for token in [
            String::new(),
            "just-one-segment".to_string(),
            format!("{}.{}", parts[0], parts[1]),
            format!("{}.{}.{}.extra", parts[0], parts[1], parts[2]),
            format!(".{}.{}", parts[1], parts[2]),
            format!("{}..{}", parts[0], parts[2]),
            format!("{}.{}.", parts[0], parts[1]),
            format!("{}.{}.!!not-base64!!", parts[0], parts[1]),
        ] {
            assert_invalid_token(codec.verify_at(&secret, &token, at(10_001)));
        }
    }

    #[test]
    fn test_expired_token_with_bad_signature_reports_signature_first() {
        // Signature is checked before expiry, so a tampered expired token
        // never leaks its expiry state.
        let codec = codec(60);
        let secret = Secret::new("per-account-signing-secret");
        let other = Secret::new("not-the-signer");
        let issued = codec
            .issue_at(AccountId(1), &secret, Map::new(), at(10_000))
            .expect("issue");

        let err = codec
            .verify_at(&other, &issued.token, at(99_999))
            .expect_err("wrong key");
        assert!(matches!(
            err,
            AuthError::Token(TokenError::SignatureInvalid)
        ));
    }

    #[test]
    fn test_issued_tokens_differ_even_for_identical_input() {
        let codec = codec(3600);
        let secret = Secret::new("per-account-signing-secret");
        let a = codec
            .issue_at(AccountId(1), &secret, Map::new(), at(10_000))
            .expect("issue");
        let b = codec
            .issue_at(AccountId(1), &secret, Map::new(), at(10_000))
            .expect("issue");
        // The per-issuance nonce keeps byte-identical replays apart.
        assert_ne!(a.token, b.token);
    }
}
