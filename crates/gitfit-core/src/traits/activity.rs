//! Engagement bookkeeping collaborator.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::AccountId;

/// Sink for per-account engagement events (last-seen, streak counters).
///
/// The authentication core never mutates engagement state itself; callers
/// notify a sink after a successful authentication. Failures here must not
/// fail the request that triggered them.
#[async_trait]
pub trait ActivitySink: Send + Sync {
    /// Record a successful authentication for the given account.
    async fn record_auth(&self, account_id: AccountId) -> AppResult<()>;
}

/// An [`ActivitySink`] that discards events.
///
/// Used in tests and by deployments that run engagement tracking elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullActivitySink;

#[async_trait]
impl ActivitySink for NullActivitySink {
    async fn record_auth(&self, _account_id: AccountId) -> AppResult<()> {
        Ok(())
    }
}
