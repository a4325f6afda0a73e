//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gitfit_auth::token::SessionClaims;
use gitfit_core::AccountId;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Body of a successful `POST /api/accounts`.
///
/// The single place the platform discloses a secret: the client must
/// store it, it is not retrievable later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreatedResponse {
    /// The new account's id.
    pub account_id: AccountId,
    /// The opaque credential, disclosed once.
    pub secret: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Body of a successful `GET /api/accounts/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// The authenticated account's id.
    pub account_id: AccountId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Body of a successful `POST /api/accounts/rotate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretRotatedResponse {
    /// The replacement secret; everything signed under the old one is
    /// now unverifiable.
    pub secret: String,
}

/// Body of a successful `POST /api/sessions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIssuedResponse {
    /// The compact signed token.
    pub token: String,
    /// Issuance time, unix seconds.
    pub issued_at: i64,
    /// Expiry, unix seconds.
    pub expires_at: i64,
}

/// Body of a successful `POST /api/sessions/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionVerifiedResponse {
    /// The resolved account.
    pub account_id: AccountId,
    /// The verified claims, caller fields included.
    pub claims: SessionClaims,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the service can answer.
    pub status: String,
    /// Service version.
    pub version: String,
}
