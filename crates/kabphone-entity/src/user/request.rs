//! Request payloads for the user endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kabphone_core::error::AppError;

/// Punctuation accepted as the "special character" in a password.
const PASSWORD_SPECIALS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Body of `POST /users/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// Body of `POST /users/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Plain-text password.
    pub password: String,
    /// Must equal `password`.
    pub confirm_password: String,
    /// Ten digits starting with `0`.
    pub phone_number: String,
    /// LINE messenger ID (optional on the form).
    #[serde(default)]
    pub line_id: String,
    /// Delivery address.
    pub address: String,
    /// Age in years.
    pub age: u32,
    /// Date of birth, serialized as RFC 3339.
    pub birth_date: DateTime<Utc>,
}

impl RegisterRequest {
    /// Apply the registration form's checks before anything is sent.
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("username", &self.username),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("password", &self.password),
            ("confirm_password", &self.confirm_password),
            ("phone_number", &self.phone_number),
            ("address", &self.address),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(AppError::validation(format!("{field} is required")));
        }
        if self.password != self.confirm_password {
            return Err(AppError::validation("Passwords do not match"));
        }
        validate_password(&self.password)?;
        validate_phone_number(&self.phone_number)?;
        validate_address(&self.address)?;
        if self.age == 0 {
            return Err(AppError::validation("age is required"));
        }
        Ok(())
    }
}

/// Body of `PUT /users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
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
    pub address: String,
    /// Age in years.
    pub age: u32,
    /// Date of birth.
    pub birth_date: DateTime<Utc>,
}

impl UpdateProfileRequest {
    /// Apply the profile form's checks.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_phone_number(&self.phone_number)?;
        validate_address(&self.address)
    }
}

/// At least six characters with a lowercase letter, an uppercase letter,
/// a digit, and a special character.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    let ok = password.chars().count() >= 6
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c));
    if ok {
        Ok(())
    } else {
        Err(AppError::validation(
            "Password must contain at least 1 uppercase letter, 1 lowercase letter, 1 number, \
             1 special character, and be at least 6 characters long",
        ))
    }
}

/// Ten digits starting with `0`.
pub fn validate_phone_number(phone_number: &str) -> Result<(), AppError> {
    let ok = phone_number.len() == 10
        && phone_number.starts_with('0')
        && phone_number.chars().all(|c| c.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(AppError::validation(
            "Phone number must be 10 digits and start with 0",
        ))
    }
}

/// More than ten characters.
pub fn validate_address(address: &str) -> Result<(), AppError> {
    if address.chars().count() > 10 {
        Ok(())
    } else {
        Err(AppError::validation(
            "Address must be more than 10 characters",
        ))
    }
}
