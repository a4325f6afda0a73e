//! Claims carried inside a session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use gitfit_core::AccountId;

/// Claim names owned by the codec. Caller-supplied fields under these
/// names are discarded at issuance rather than shadowing the real values.
const RESERVED_CLAIMS: [&str; 4] = ["accountId", "issuedAt", "expiresAt", "nonce"];

/// The structured payload of a session token.
///
/// Never persisted — claims exist only in flight, and simply become
/// unverifiable once `expires_at` passes or the account secret rotates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    /// The account this session belongs to.
    pub account_id: AccountId,
    /// Issuance time, unix seconds.
    pub issued_at: i64,
    /// Expiry, unix seconds. Always `issued_at + ttl`, fixed at issuance.
    pub expires_at: i64,
    /// Unique per issuance, so two otherwise-identical tokens never
    /// compare byte-equal.
    pub nonce: String,
    /// Caller-supplied claim fields, opaque to the core.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionClaims {
    /// Build claims for a new session issued at `now`.
    pub fn new(
        account_id: AccountId,
        now: DateTime<Utc>,
        ttl_seconds: u64,
        mut extra: Map<String, Value>,
    ) -> Self {
        extra.retain(|key, _| !RESERVED_CLAIMS.contains(&key.as_str()));
        let issued_at = now.timestamp();
        Self {
            account_id,
            issued_at,
            expires_at: issued_at + ttl_seconds as i64,
            nonce: Uuid::new_v4().to_string(),
            extra,
        }
    }

    /// Whether the token is expired at `now`. The boundary counts as
    /// expired: a token with `expires_at == now` is dead.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at
    }

    /// Expiry as a `DateTime<Utc>`.
    pub fn expiry(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.expires_at, 0).unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(ts: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(ts, 0).unwrap()
    }

    #[test]
    fn test_expiry_derived_from_ttl() {
        let claims = SessionClaims::new(AccountId(1), at(1_000), 60, Map::new());
        assert_eq!(claims.issued_at, 1_000);
        assert_eq!(claims.expires_at, 1_060);
    }

    #[test]
    fn test_expiry_boundary_is_expired() {
        let claims = SessionClaims::new(AccountId(1), at(1_000), 60, Map::new());
        assert!(!claims.is_expired_at(at(1_059)));
        assert!(claims.is_expired_at(at(1_060)));
        assert!(claims.is_expired_at(at(1_061)));
    }

    #[test]
    fn test_nonce_unique_per_issuance() {
        let a = SessionClaims::new(AccountId(1), at(1_000), 60, Map::new());
        let b = SessionClaims::new(AccountId(1), at(1_000), 60, Map::new());
        assert_ne!(a.nonce, b.nonce);
    }

    #[test]
    fn test_json_field_names_are_camel_case() {
        let mut extra = Map::new();
        extra.insert("workoutId".to_string(), serde_json::json!(17));
        let claims = SessionClaims::new(AccountId(42), at(1_000), 60, extra);

        let json = serde_json::to_value(&claims).expect("serialize");
        assert_eq!(json["accountId"], serde_json::json!(42));
        assert_eq!(json["issuedAt"], serde_json::json!(1_000));
        assert_eq!(json["expiresAt"], serde_json::json!(1_060));
        assert!(json["nonce"].is_string());
        // Caller fields ride alongside, not nested.
        assert_eq!(json["workoutId"], serde_json::json!(17));
    }

    #[test]
    fn test_reserved_caller_claims_are_dropped() {
        let mut extra = Map::new();
        extra.insert("expiresAt".to_string(), serde_json::json!(9_999_999_999i64));
        extra.insert("note".to_string(), serde_json::json!("kept"));
        let claims = SessionClaims::new(AccountId(1), at(1_000), 60, extra);

        assert_eq!(claims.expires_at, 1_060);
        assert!(!claims.extra.contains_key("expiresAt"));
        assert!(claims.extra.contains_key("note"));
    }

    #[test]
    fn test_round_trip() {
        let mut extra = Map::new();
        extra.insert("device".to_string(), serde_json::json!("watch"));
        let claims = SessionClaims::new(AccountId(7), at(2_000), 120, extra);

        let json = serde_json::to_string(&claims).expect("serialize");
        let parsed: SessionClaims = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, claims);
    }
}
