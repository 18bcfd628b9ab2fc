//! # kabphone-core
//!
//! Core crate for the KabPhone storefront client. Contains the unified
//! error system, configuration schemas, response envelopes, pagination
//! parameters, and the seam traits the client layers are wired through.
//!
//! This crate has **no** internal dependencies on other KabPhone crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorInfo, ErrorKind};
pub use result::AppResult;
