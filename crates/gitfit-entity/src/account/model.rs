//! Account model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use gitfit_core::AccountId;

use super::secret::Secret;

/// The single principal type of the platform.
///
/// An account holds exactly one opaque secret at a time. The secret is
/// replaced wholesale on rotation and never partially updated; it is
/// excluded from serialized output and must be read through
/// [`Secret::expose`] at the one place that discloses it (account
/// creation and rotation responses).
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Account {
    /// Primary key, assigned by the store.
    pub id: AccountId,
    /// The opaque credential currently on record.
    #[serde(skip_serializing)]
    pub secret: Secret,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_omits_secret() {
        let account = Account {
            id: AccountId(42),
            secret: Secret::new("super-secret-value-1234"),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&account).expect("serialize");
        assert_eq!(json.get("id"), Some(&serde_json::json!(42)));
        assert!(json.get("secret").is_none());
    }
}
