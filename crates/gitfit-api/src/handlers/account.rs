//! Account handlers — create, me, rotate.

use axum::Json;
use axum::extract::State;
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderMap, HeaderValue, StatusCode};

use gitfit_core::AppError;

use crate::dto::response::{
    AccountCreatedResponse, AccountResponse, ApiResponse, SecretRotatedResponse,
};
use crate::error::ApiError;
use crate::extractors::ApiKeyAuth;
use crate::state::AppState;

/// POST /api/accounts
///
/// Creates an account and discloses its secret — the only time the raw
/// value ever leaves the platform.
pub async fn create_account(
    State(state): State<AppState>,
) -> Result<(StatusCode, HeaderMap, Json<ApiResponse<AccountCreatedResponse>>), ApiError> {
    let account = state.issuer.create_account().await.map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        no_store_headers(),
        Json(ApiResponse::ok(AccountCreatedResponse {
            account_id: account.id,
            secret: account.secret.expose().to_string(),
            created_at: account.created_at,
        })),
    ))
}

/// GET /api/accounts/me
pub async fn me(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state
        .store
        .find_by_id(auth.account_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::from(AppError::not_found("account no longer exists")))?;

    Ok(Json(ApiResponse::ok(AccountResponse {
        account_id: account.id,
        created_at: account.created_at,
    })))
}

/// POST /api/accounts/rotate
///
/// Replaces the account's secret wholesale. Every session token signed
/// under the previous secret stops verifying immediately.
pub async fn rotate_secret(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
) -> Result<(StatusCode, HeaderMap, Json<ApiResponse<SecretRotatedResponse>>), ApiError> {
    let secret = state
        .issuer
        .rotate(auth.account_id)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::OK,
        no_store_headers(),
        Json(ApiResponse::ok(SecretRotatedResponse {
            secret: secret.expose().to_string(),
        })),
    ))
}

fn no_store_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers
}
