//! Response envelopes used by the backend REST API.
//!
//! Successful responses follow `{data, message}`; paginated listings add a
//! `total`. Error responses carry at least `{message}`.

use serde::{Deserialize, Deserializer, Serialize};

/// Standard success envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Human-readable outcome, shown in success toasts.
    #[serde(default)]
    pub message: String,
    /// The payload.
    pub data: T,
}

/// Success envelope for paginated listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    /// Human-readable outcome.
    #[serde(default)]
    pub message: String,
    /// Items on this page. The backend sends `null` for an empty page.
    #[serde(
        default = "Vec::new",
        deserialize_with = "null_as_empty",
        bound(deserialize = "T: Deserialize<'de>")
    )]
    pub data: Vec<T>,
    /// Total number of matching items, when the server reports it.
    #[serde(default)]
    pub total: Option<u64>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope for mutations whose payload the client never reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    /// Human-readable outcome.
    #[serde(default)]
    pub message: String,
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Server-supplied message, if any.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The bearer token.
    pub access_token: String,
}
