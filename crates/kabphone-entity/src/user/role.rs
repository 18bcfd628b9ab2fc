//! User role as carried by the backend and the token's `role` claim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Roles known to the storefront.
///
/// The backend stores roles as free-form strings (new accounts default to
/// `"guess"`), so unknown values are preserved rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    /// Catalog, order, and income administrator.
    Admin,
    /// A shopper.
    Customer,
    /// The backend's default role for fresh registrations.
    Guest,
    /// Any other role string.
    Other(String),
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as the backend spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
            Self::Guest => "guess",
            Self::Other(role) => role.as_str(),
        }
    }
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => Self::Admin,
            "customer" => Self::Customer,
            "guess" | "guest" => Self::Guest,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for UserRole {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
