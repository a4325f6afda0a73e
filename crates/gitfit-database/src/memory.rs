//! Ephemeral in-process account store.
//!
//! Backs hermetic tests and local development runs without PostgreSQL.
//! Reproduces the storage contract the issuer depends on, including the
//! `Conflict` signal for duplicate secrets.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use gitfit_auth::store::AccountStore;
use gitfit_core::{AccountId, AppError, AppResult};
use gitfit_entity::{Account, Secret};

/// In-memory [`AccountStore`] implementation.
#[derive(Default)]
pub struct MemoryAccountStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    accounts: HashMap<i64, Account>,
    next_id: i64,
}

impl MemoryAccountStore {
    /// Create an empty store; ids are assigned sequentially from 1.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn insert_account(&self, secret: &Secret) -> AppResult<Account> {
        let mut inner = self.inner.write().await;
        if inner.accounts.values().any(|a| a.secret == *secret) {
            return Err(AppError::conflict("account secret already in use"));
        }
        inner.next_id += 1;
        let next_id = inner.next_id;
        let account = Account {
            id: AccountId(next_id),
            secret: secret.clone(),
            created_at: Utc::now(),
        };
        inner.accounts.insert(next_id, account.clone());
        Ok(account)
    }

    async fn lookup_by_secret(&self, secret: &str) -> AppResult<Option<AccountId>> {
        let inner = self.inner.read().await;
        Ok(inner
            .accounts
            .values()
            .find(|a| a.secret.expose() == secret)
            .map(|a| a.id))
    }

    async fn replace_secret(&self, id: AccountId, new_secret: &Secret) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if inner
            .accounts
            .values()
            .any(|a| a.id != id && a.secret == *new_secret)
        {
            return Err(AppError::conflict("account secret already in use"));
        }
        match inner.accounts.get_mut(&id.as_i64()) {
            Some(account) => {
                account.secret = new_secret.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!("account {id} not found"))),
        }
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        let inner = self.inner.read().await;
        Ok(inner.accounts.get(&id.as_i64()).cloned())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gitfit_core::error::ErrorKind;

    use super::*;

    #[tokio::test]
    async fn test_duplicate_secret_signals_conflict() {
        let store = MemoryAccountStore::new();
        store
            .insert_account(&Secret::new("taken"))
            .await
            .expect("first insert");

        let err = store
            .insert_account(&Secret::new("taken"))
            .await
            .expect_err("duplicate");
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_replace_to_occupied_secret_signals_conflict() {
        let store = MemoryAccountStore::new();
        let a = store
            .insert_account(&Secret::new("secret-a"))
            .await
            .expect("insert a");
        store
            .insert_account(&Secret::new("secret-b"))
            .await
            .expect("insert b");

        let err = store
            .replace_secret(a.id, &Secret::new("secret-b"))
            .await
            .expect_err("occupied");
        assert_eq!(err.kind, ErrorKind::Conflict);

        // Replacing with a fresh value succeeds and re-keys the lookup.
        store
            .replace_secret(a.id, &Secret::new("secret-c"))
            .await
            .expect("replace");
        assert_eq!(
            store.lookup_by_secret("secret-c").await.expect("lookup"),
            Some(a.id)
        );
        assert_eq!(store.lookup_by_secret("secret-a").await.expect("lookup"), None);
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = MemoryAccountStore::new();
        let a = store
            .insert_account(&Secret::new("secret-a"))
            .await
            .expect("insert a");
        let b = store
            .insert_account(&Secret::new("secret-b"))
            .await
            .expect("insert b");
        assert_eq!(a.id.as_i64() + 1, b.id.as_i64());
    }
}
