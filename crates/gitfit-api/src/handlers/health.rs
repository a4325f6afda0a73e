//! Health check handler.

use axum::Json;
use axum::extract::State;

use gitfit_core::AppError;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
///
/// Liveness plus a storage reachability probe.
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    state.store.ping().await.map_err(|e| {
        tracing::error!(error = %e, "health check failed to reach account storage");
        ApiError::from(AppError::service_unavailable("account storage unreachable"))
    })?;

    Ok(Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })))
}
