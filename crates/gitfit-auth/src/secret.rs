//! Opaque secret generation, issuance, and rotation.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use gitfit_core::{AccountId, AppError, AppResult};
use gitfit_entity::{Account, Secret};

use crate::store::AccountStore;

/// Symbols a secret may contain: ASCII letters, digits, and a fixed
/// punctuation set. 91 symbols at 64 positions keeps brute-force guessing
/// infeasible.
pub const SECRET_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!#$%&()*+,-./:;<=>?@[\\]^_`{|}~";

/// Fixed length of every issued secret.
pub const SECRET_LENGTH: usize = 64;

/// How many uniqueness collisions to absorb before giving up. At 64
/// positions over 91 symbols a single collision is already vanishingly
/// unlikely; hitting this limit indicates a broken RNG or store.
const MAX_GENERATE_ATTEMPTS: u32 = 4;

/// Draw one uniformly random secret from the fixed alphabet.
pub fn generate_secret() -> Secret {
    let mut rng = rand::rng();
    let value: String = (0..SECRET_LENGTH)
        .map(|_| SECRET_ALPHABET[rng.random_range(0..SECRET_ALPHABET.len())] as char)
        .collect();
    Secret::new(value)
}

/// Issues collision-free opaque secrets at account creation and rotation.
///
/// Uniqueness is enforced at the storage layer (unique index), not by a
/// racy check-then-insert: the issuer simply retries generation when the
/// store reports a conflict.
pub struct SecretIssuer {
    store: Arc<dyn AccountStore>,
}

impl SecretIssuer {
    /// Create an issuer over the given store.
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Create a new account under a freshly generated secret.
    pub async fn create_account(&self) -> AppResult<Account> {
        let account = insert_with_retry(self.store.as_ref(), generate_secret).await?;
        debug!(account_id = %account.id, "account created");
        Ok(account)
    }

    /// Replace the account's secret wholesale, returning the new value.
    ///
    /// No token invalidation happens here: every token signed under the
    /// old secret simply stops verifying.
    pub async fn rotate(&self, account_id: AccountId) -> AppResult<Secret> {
        let secret = replace_with_retry(self.store.as_ref(), account_id, generate_secret).await?;
        debug!(account_id = %account_id, "secret rotated");
        Ok(secret)
    }
}

async fn insert_with_retry(
    store: &dyn AccountStore,
    mut next_secret: impl FnMut() -> Secret,
) -> AppResult<Account> {
    for attempt in 1..=MAX_GENERATE_ATTEMPTS {
        let candidate = next_secret();
        match store.insert_account(&candidate).await {
            Ok(account) => return Ok(account),
            Err(e) if e.is_conflict() => {
                warn!(attempt, "generated secret collided with an existing account, retrying");
            }
            Err(e) => return Err(e),
        }
    }
    Err(AppError::internal(
        "exhausted secret generation attempts without finding a unique value",
    ))
}

async fn replace_with_retry(
    store: &dyn AccountStore,
    account_id: AccountId,
    mut next_secret: impl FnMut() -> Secret,
) -> AppResult<Secret> {
    for attempt in 1..=MAX_GENERATE_ATTEMPTS {
        let candidate = next_secret();
        match store.replace_secret(account_id, &candidate).await {
            Ok(()) => return Ok(candidate),
            Err(e) if e.is_conflict() => {
                warn!(attempt, "generated secret collided with an existing account, retrying");
            }
            Err(e) => return Err(e),
        }
    }
    Err(AppError::internal(
        "exhausted secret generation attempts without finding a unique value",
    ))
}
