//! Secret-to-account resolution. The trust anchor for everything above it.

use std::sync::Arc;

use tracing::{debug, warn};

use gitfit_core::AccountId;

use crate::error::{AuthError, CredentialError};
use crate::store::AccountStore;

/// Resolves a presented secret to an account id via the account store.
pub struct KeyVerifier {
    store: Arc<dyn AccountStore>,
}

impl KeyVerifier {
    /// Create a verifier over the given store.
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Resolve `presented` to the owning account.
    ///
    /// An absent or empty credential is a distinct failure from a
    /// present-but-unknown one, so callers can count "no attempt" and
    /// "failed attempt" separately without learning which accounts
    /// exist. The lookup is a single indexed round trip; a storage fault
    /// surfaces as [`AuthError::StorageUnavailable`], never as an invalid
    /// credential.
    pub async fn verify(&self, presented: &str) -> Result<AccountId, AuthError> {
        if presented.is_empty() {
            warn!(event = "auth.key_missing", "no API key presented");
            return Err(CredentialError::Missing.into());
        }

        match self.store.lookup_by_secret(presented).await {
            Ok(Some(account_id)) => {
                debug!(%account_id, "API key verified");
                Ok(account_id)
            }
            Ok(None) => {
                warn!(event = "auth.key_invalid", "presented API key matches no account");
                Err(CredentialError::Invalid.into())
            }
            Err(e) => Err(AuthError::StorageUnavailable(e)),
        }
    }
}
