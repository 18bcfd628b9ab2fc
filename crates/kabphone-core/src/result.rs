//! Convenience result type alias for KabPhone.

use crate::error::AppError;

/// A specialized `Result` type for storefront operations.
pub type AppResult<T> = Result<T, AppError>;
