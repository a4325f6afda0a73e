//! The account store port consumed by the authentication core.

use async_trait::async_trait;

use gitfit_core::{AccountId, AppResult};
use gitfit_entity::{Account, Secret};

/// Persistence interface for accounts and their secrets.
///
/// The core consumes this as an injected `Arc<dyn AccountStore>`; the
/// production implementation lives in `gitfit-database`. Secret
/// uniqueness is the store's responsibility: `insert_account` and
/// `replace_secret` must enforce it transactionally (a unique index, not
/// a probe-then-insert) and surface violations as
/// [`gitfit_core::error::ErrorKind::Conflict`] so the issuer can retry
/// with a fresh candidate.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account under the given candidate secret.
    async fn insert_account(&self, secret: &Secret) -> AppResult<Account>;

    /// Resolve a presented secret to an account id.
    ///
    /// Must be a single indexed point lookup — exact, case-sensitive.
    async fn lookup_by_secret(&self, secret: &str) -> AppResult<Option<AccountId>>;

    /// Atomically overwrite the stored secret for an account.
    ///
    /// `ErrorKind::NotFound` when the account does not exist.
    async fn replace_secret(&self, id: AccountId, new_secret: &Secret) -> AppResult<()>;

    /// Fetch an account by primary key.
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;

    /// Storage reachability probe for health checks.
    async fn ping(&self) -> AppResult<()>;
}
