//! Per-account engagement record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use gitfit_core::AccountId;

/// Engagement bookkeeping row, maintained by the activity collaborator
/// outside the authentication core.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AccountActivity {
    /// The account this record belongs to.
    pub account_id: AccountId,
    /// Timestamp of the most recent successful authentication.
    pub last_seen_at: DateTime<Utc>,
    /// Total number of successful authentications.
    pub auth_count: i64,
}
