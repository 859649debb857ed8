//! Basic-auth credential encoding for the upstream API.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Encodes an application id/secret pair as `base64(id:secret)`.
#[must_use]
pub fn encode_credentials(app_id: &str, app_secret: &str) -> String {
    BASE64.encode(format!("{}:{}", app_id, app_secret))
}

/// Builds the `Authorization` header value for an application id/secret pair.
#[must_use]
pub fn basic_auth_header(app_id: &str, app_secret: &str) -> String {
    format!("Basic {}", encode_credentials(app_id, app_secret))
}
