//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and session-token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session token lifetime in seconds.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: default_session_ttl(),
        }
    }
}

fn default_session_ttl() -> u64 {
    3600
}
