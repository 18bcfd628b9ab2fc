//! Advisory decoding of a bearer token's payload.
//!
//! The signature is never checked. The decoded claims only steer what the
//! client renders; every protected call is still authorized by the server.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use tracing::debug;

use kabphone_core::error::{AppError, ErrorKind};

use super::claims::Claims;

/// Splits `raw_token` into its three segments and decodes the middle one.
///
/// Fails with `MalformedToken` when the token does not have exactly three
/// dot-separated segments, or when the payload is not base64url-encoded
/// JSON; fails with `InvalidToken` when the payload has no usable `role`.
pub fn decode_token(raw_token: &str) -> Result<Claims, AppError> {
    let segments: Vec<&str> = raw_token.split('.').collect();
    if segments.len() != 3 {
        return Err(AppError::malformed_token("Invalid token format"));
    }

    let bytes = STANDARD
        .decode(to_padded_base64(segments[1]))
        .map_err(undecodable)?;

    let payload: Value = serde_json::from_slice(&bytes).map_err(undecodable)?;

    let Value::Object(fields) = &payload else {
        return Err(AppError::malformed_token("Failed to decode token"));
    };

    match fields.get("role") {
        Some(Value::String(role)) if !role.is_empty() => {}
        _ => return Err(AppError::invalid_token("Invalid role in token")),
    }

    let claims: Claims = serde_json::from_value(payload).map_err(undecodable)?;

    debug!(role = ?claims.role, subject = ?claims.subject_id, "Decoded token claims");
    Ok(claims)
}

fn undecodable(err: impl std::error::Error + Send + Sync + 'static) -> AppError {
    AppError::with_source(ErrorKind::MalformedToken, "Failed to decode token", err)
}

/// base64url → base64: `-`→`+`, `_`→`/`, then pad with `=` to a multiple of 4.
fn to_padded_base64(segment: &str) -> String {
    let mut converted: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let remainder = converted.len() % 4;
    if remainder != 0 {
        converted.push_str(&"=".repeat(4 - remainder));
    }
    converted
}
