//! Account repository — the production [`AccountStore`].

use async_trait::async_trait;
use sqlx::PgPool;

use gitfit_auth::store::AccountStore;
use gitfit_core::error::{AppError, ErrorKind};
use gitfit_core::{AccountId, AppResult};
use gitfit_entity::{Account, Secret};

/// Repository for account rows.
///
/// Secret uniqueness is enforced by the unique index on
/// `accounts.secret`; violations surface as `ErrorKind::Conflict` so the
/// issuer retries with a fresh candidate instead of racing a
/// check-then-insert.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn insert_account(&self, secret: &Secret) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (secret) VALUES ($1) RETURNING id, secret, created_at",
        )
        .bind(secret.expose())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to insert account"))
    }

    async fn lookup_by_secret(&self, secret: &str) -> AppResult<Option<AccountId>> {
        sqlx::query_scalar::<_, AccountId>("SELECT id FROM accounts WHERE secret = $1")
            .bind(secret)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to look up account by secret", e)
            })
    }

    async fn replace_secret(&self, id: AccountId, new_secret: &Secret) -> AppResult<()> {
        let result = sqlx::query("UPDATE accounts SET secret = $2 WHERE id = $1")
            .bind(id)
            .bind(new_secret.expose())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Failed to replace account secret"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("account {id} not found")));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT id, secret, created_at FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find account", e))
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}

/// Map write errors, distinguishing unique-index violations so the
/// secret issuer can retry them.
fn map_write_error(e: sqlx::Error, context: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::conflict("account secret already in use");
        }
    }
    AppError::with_source(ErrorKind::Database, context.to_string(), e)
}
