//! Claims decoded from the bearer token's payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use kabphone_entity::user::UserRole;

/// The subset of the token payload the storefront reads.
///
/// The backend issues tokens whose payload mirrors the user row (`id`,
/// `username`, names, `role`) plus `exp`. Only `role` drives behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID, as a string regardless of its JSON type.
    #[serde(
        default,
        rename = "id",
        alias = "sub",
        deserialize_with = "subject_from_json",
        skip_serializing_if = "Option::is_none"
    )]
    pub subject_id: Option<String>,
    /// Login name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Role used for route gating. Always present on a stored session.
    #[serde(default)]
    pub role: Option<UserRole>,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(
        default,
        rename = "iat",
        deserialize_with = "timestamp_from_json",
        skip_serializing_if = "Option::is_none"
    )]
    pub issued_at: Option<i64>,
    /// Expiration timestamp (seconds since epoch).
    #[serde(
        default,
        rename = "exp",
        deserialize_with = "timestamp_from_json",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry: Option<i64>,
}

impl Claims {
    /// Claims carrying only a role. Handy for fakes and tests.
    pub fn with_role(role: impl Into<UserRole>) -> Self {
        Self {
            subject_id: None,
            username: None,
            role: Some(role.into()),
            issued_at: None,
            expiry: None,
        }
    }

    /// Whether the role claim is `admin`.
    pub fn is_admin(&self) -> bool {
        self.role.as_ref().is_some_and(UserRole::is_admin)
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiry.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Checks whether the advertised expiry has passed.
    ///
    /// Advisory only; the server decides whether the token is still good.
    pub fn is_expired(&self) -> bool {
        self.expiry
            .is_some_and(|exp| Utc::now().timestamp() >= exp)
    }
}

fn subject_from_json<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn timestamp_from_json<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    })
}
