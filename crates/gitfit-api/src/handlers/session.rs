//! Session handlers — issue and verify.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderMap, HeaderValue, StatusCode};

use gitfit_core::AppError;

use crate::dto::request::IssueSessionRequest;
use crate::dto::response::{ApiResponse, SessionIssuedResponse, SessionVerifiedResponse};
use crate::error::ApiError;
use crate::extractors::{ApiKeyAuth, SessionAuth};
use crate::state::AppState;

/// POST /api/sessions
///
/// Issues a session token signed with the authenticated account's own
/// secret. Caller-supplied claims ride along opaquely.
pub async fn issue_session(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    body: Bytes,
) -> Result<(StatusCode, HeaderMap, Json<ApiResponse<SessionIssuedResponse>>), ApiError> {
    let request: IssueSessionRequest = if body.is_empty() {
        IssueSessionRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|_| {
            ApiError::from(AppError::validation("request body must be a JSON object"))
        })?
    };

    let issued = state
        .authenticator
        .codec()
        .issue(auth.account_id, &auth.secret, request.claims)
        .map_err(ApiError::from)?;

    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

    Ok((
        StatusCode::OK,
        headers,
        Json(ApiResponse::ok(SessionIssuedResponse {
            token: issued.token,
            issued_at: issued.claims.issued_at,
            expires_at: issued.claims.expires_at,
        })),
    ))
}

/// POST /api/sessions/verify
///
/// Runs the full pipeline — key, then token — and echoes the resolved
/// account and claims back to the caller.
pub async fn verify_session(
    session: SessionAuth,
) -> Result<Json<ApiResponse<SessionVerifiedResponse>>, ApiError> {
    Ok(Json(ApiResponse::ok(SessionVerifiedResponse {
        account_id: session.account_id,
        claims: session.claims,
    })))
}
