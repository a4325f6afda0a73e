//! Engagement bookkeeping repository.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use gitfit_core::error::{AppError, ErrorKind};
use gitfit_core::traits::ActivitySink;
use gitfit_core::{AccountId, AppResult};
use gitfit_entity::AccountActivity;

/// Upserts per-account engagement rows on successful authentication.
///
/// This is the delegated side effect of the request pipeline: the
/// authentication core itself never writes here.
#[derive(Debug, Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    /// Create a new activity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivitySink for ActivityRepository {
    async fn record_auth(&self, account_id: AccountId) -> AppResult<()> {
        let activity = sqlx::query_as::<_, AccountActivity>(
            "INSERT INTO account_activity (account_id, last_seen_at, auth_count) \
             VALUES ($1, now(), 1) \
             ON CONFLICT (account_id) DO UPDATE \
             SET last_seen_at = now(), auth_count = account_activity.auth_count + 1 \
             RETURNING account_id, last_seen_at, auth_count",
        )
        .bind(account_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record account activity", e)
        })?;

        debug!(
            account_id = %activity.account_id,
            auth_count = activity.auth_count,
            last_seen_at = %activity.last_seen_at,
            "recorded authentication activity"
        );
        Ok(())
    }
}
