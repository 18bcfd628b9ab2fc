//! User profile as returned by `GET /users/profile`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::UserRole;

/// A registered storefront user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact number.
    pub phone_number: String,
    /// LINE messenger ID.
    #[serde(default)]
    pub line_id: String,
    /// Delivery address.
    #[serde(default)]
    pub address: String,
    /// Age in years.
    #[serde(default)]
    pub age: u32,
    /// Date of birth.
    pub birth_date: Option<DateTime<Utc>>,
    /// Role.
    pub role: UserRole,
}

impl User {
    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
