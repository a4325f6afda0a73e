//! Request DTOs.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Body of `POST /api/sessions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueSessionRequest {
    /// Caller-supplied claim fields to embed in the token, opaque to the
    /// authentication core.
    #[serde(default)]
    pub claims: Map<String, Value>,
}
