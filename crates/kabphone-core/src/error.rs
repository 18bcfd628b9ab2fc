//! Unified application error types for KabPhone.
//!
//! Every layer maps its failures into [`AppError`] so that the gateway,
//! the query cache, and the storefront services can propagate them with `?`
//! and still tell a server-reported failure apart from a dropped connection
//! or a token that could not be decoded.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback message for non-2xx responses that carry no `message` field.
pub const GENERIC_SERVER_MESSAGE: &str = "Request failed";

/// Message shown when no response reached the client at all.
pub const NETWORK_UNAVAILABLE_MESSAGE: &str =
    "Unable to connect to the server. Please try again later.";

/// Top-level error kind categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The token is not three dot-separated segments, or its payload could
    /// not be base64url-decoded or parsed as JSON.
    MalformedToken,
    /// The token payload decoded but carries no usable `role` claim.
    InvalidToken,
    /// The request never produced a response (connect failure, timeout).
    NetworkUnavailable,
    /// The server answered 401. Handled globally by the gateway policy.
    Unauthorized,
    /// The server answered with any other 4xx/5xx status.
    Server,
    /// Client-side input validation failed before a request was issued.
    Validation,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// Persisting or loading local session state failed.
    Storage,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedToken => write!(f, "MALFORMED_TOKEN"),
            Self::InvalidToken => write!(f, "INVALID_TOKEN"),
            Self::NetworkUnavailable => write!(f, "NETWORK_UNAVAILABLE"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Server => write!(f, "SERVER"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout KabPhone.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message, suitable for a toast.
    pub message: String,
    /// HTTP status for server-reported failures.
    pub status: Option<u16>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a malformed-token error.
    pub fn malformed_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedToken, message)
    }

    /// Create an invalid-token error.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidToken, message)
    }

    /// Create a network-unavailable error with the standard message.
    pub fn network_unavailable(
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(
            ErrorKind::NetworkUnavailable,
            NETWORK_UNAVAILABLE_MESSAGE,
            source,
        )
    }

    /// Create an unauthorized (401) error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        let mut err = Self::new(ErrorKind::Unauthorized, message);
        err.status = Some(401);
        err
    }

    /// Create a server-reported error carrying the response status.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(ErrorKind::Server, message);
        err.status = Some(status);
        err
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error is the server's 401 answer.
    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }

    /// Whether the error came from decoding a token.
    pub fn is_token_error(&self) -> bool {
        matches!(self.kind, ErrorKind::MalformedToken | ErrorKind::InvalidToken)
    }

    /// Displayable projection of this error.
    pub fn info(&self) -> ErrorInfo {
        ErrorInfo {
            status: self.status,
            message: self.message.clone(),
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            status: self.status,
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

/// What a view shows for a failed fetch or mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// HTTP status, when the server answered.
    pub status: Option<u16>,
    /// Server-supplied message, or a generic fallback.
    pub message: String,
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {status})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_carries_status() {
        let err = AppError::server(404, "phone not found");
        assert_eq!(err.kind, ErrorKind::Server);
        assert_eq!(
            err.info(),
            ErrorInfo {
                status: Some(404),
                message: "phone not found".to_string()
            }
        );
    }

    #[test]
    fn test_unauthorized_is_401() {
        let err = AppError::unauthorized("token expired");
        assert!(err.is_unauthorized());
        assert_eq!(err.status, Some(401));
    }

    #[test]
    fn test_network_error_uses_standard_message() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = AppError::network_unavailable(io);
        assert_eq!(err.kind, ErrorKind::NetworkUnavailable);
        assert_eq!(err.message, NETWORK_UNAVAILABLE_MESSAGE);
        assert!(err.status.is_none());
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("disk full");
        let err = AppError::from(io);
        assert!(std::error::Error::source(&err).is_some());
        let cloned = err.clone();
        assert!(std::error::Error::source(&cloned).is_none());
        assert_eq!(cloned.kind, ErrorKind::Storage);
    }

    #[test]
    fn test_error_info_display() {
        let info = AppError::server(500, "boom").info();
        assert_eq!(info.to_string(), "boom (HTTP 500)");
    }
}
