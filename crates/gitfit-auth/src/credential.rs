//! Strict parsing of the `Authorization: ApiKey <base64>` credential.
//!
//! One typed parser instead of ad hoc `split(' ')` handling: anything
//! that is not exactly the `ApiKey` scheme followed by one standard-
//! alphabet base64 value is rejected as malformed. Padding is restored to
//! four-byte alignment before decoding; everything else is strict.

use std::borrow::Cow;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::CredentialError;

/// The credential scheme prefix, including its single separating space.
/// Case-sensitive.
pub const API_KEY_SCHEME: &str = "ApiKey ";

/// Parse an `Authorization` header value into the raw secret.
pub fn parse_api_key_header(header: &str) -> Result<String, CredentialError> {
    let encoded = header
        .strip_prefix(API_KEY_SCHEME)
        .ok_or(CredentialError::Malformed)?;

    if encoded.is_empty() || encoded.contains(' ') {
        return Err(CredentialError::Malformed);
    }

    let padded = restore_padding(encoded)?;
    let decoded = STANDARD
        .decode(padded.as_bytes())
        .map_err(|_| CredentialError::Malformed)?;

    String::from_utf8(decoded).map_err(|_| CredentialError::Malformed)
}

/// Restore stripped `=` padding so the value is four-byte aligned.
fn restore_padding(encoded: &str) -> Result<Cow<'_, str>, CredentialError> {
    match encoded.len() % 4 {
        0 => Ok(Cow::Borrowed(encoded)),
        2 => Ok(Cow::Owned(format!("{encoded}=="))),
        3 => Ok(Cow::Owned(format!("{encoded}="))),
        // A base64 value can never be ≡ 1 (mod 4) symbols long.
        _ => Err(CredentialError::Malformed),
    }
}
