//! `ApiKeyAuth` and `SessionAuth` — the authentication extractors.
//!
//! Every authenticated route goes through one of these; handlers never
//! touch headers or tokens themselves. `ApiKeyAuth` covers standing-
//! secret operations and reads only the request head. `SessionAuth`
//! covers session-scoped operations and additionally consumes the JSON
//! body to pull the `token` field, per the platform's wire contract.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::Deserialize;

use gitfit_auth::error::{AuthError, CredentialError};
use gitfit_auth::token::SessionClaims;
use gitfit_core::{AccountId, AppError};
use gitfit_entity::Secret;

use crate::error::ApiError;
use crate::state::AppState;

/// A key-authenticated request.
///
/// Carries the presented secret so handlers that issue session tokens
/// can sign with it without a second lookup.
pub struct ApiKeyAuth {
    /// The resolved account.
    pub account_id: AccountId,
    /// The secret that resolved it.
    pub secret: Secret,
}

impl FromRequestParts<AppState> for ApiKeyAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorization = authorization_header(parts)?;

        let key = state
            .authenticator
            .authenticate(authorization.as_deref())
            .await?;

        notify_activity(state, key.account_id);
        Ok(Self {
            account_id: key.account_id,
            secret: key.secret,
        })
    }
}

/// A fully session-authenticated request.
pub struct SessionAuth {
    /// The resolved account.
    pub account_id: AccountId,
    /// The verified session claims.
    pub claims: SessionClaims,
}

/// The session token travels in the JSON body's `token` field; all other
/// body fields belong to the handler's own payload.
#[derive(Debug, Default, Deserialize)]
struct SessionEnvelope {
    #[serde(default)]
    token: Option<String>,
}

impl FromRequest<AppState> for SessionAuth {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let authorization = authorization_header(&mut parts)?;

        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|_| ApiError::from(AppError::validation("unable to read request body")))?;

        let envelope: SessionEnvelope = if bytes.is_empty() {
            SessionEnvelope::default()
        } else {
            serde_json::from_slice(&bytes).map_err(|_| {
                ApiError::from(AppError::validation("request body must be a JSON object"))
            })?
        };

        let session = state
            .authenticator
            .authenticate_session(authorization.as_deref(), envelope.token.as_deref())
            .await?;

        notify_activity(state, session.account_id);
        Ok(Self {
            account_id: session.account_id,
            claims: session.claims,
        })
    }
}

/// Read the `Authorization` header. A header that is present but not
/// valid UTF-8 counts as malformed, not missing.
fn authorization_header(parts: &mut Parts) -> Result<Option<String>, ApiError> {
    match parts.headers.get(AUTHORIZATION) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|v| Some(v.to_string()))
            .map_err(|_| ApiError::from(AuthError::from(CredentialError::Malformed))),
    }
}

/// Delegated engagement bookkeeping: spawned off the request path so the
/// authenticator itself stays a single storage round trip; failures are
/// logged and swallowed.
fn notify_activity(state: &AppState, account_id: AccountId) {
    let sink = Arc::clone(&state.activity);
    tokio::spawn(async move {
        if let Err(e) = sink.record_auth(account_id).await {
            tracing::warn!(%account_id, error = %e, "failed to record account activity");
        }
    });
}
