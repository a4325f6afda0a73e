//! The opaque per-account secret.

use std::fmt;

/// A long-lived, high-entropy per-account credential.
///
/// The secret doubles as the HMAC signing key for the account's session
/// tokens, so it must never appear in logs or serialized output. `Debug`
/// and `Display` render a masked prefix only; the raw value is available
/// exclusively through [`Secret::expose`].
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
pub struct Secret(String);

impl Secret {
    /// Wrap a raw secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Return the raw secret value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked rendering for log output: a five-character prefix at most.
    fn masked(&self) -> String {
        if self.0.len() > 8 {
            format!("{}...", &self.0[..5])
        } else {
            "***".to_string()
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&self.masked()).finish()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
