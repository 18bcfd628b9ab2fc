//! # kabphone-client
//!
//! The storefront's only path to the backend.
//!
//! - `gateway`: issues requests, attaches the bearer token, maps failures
//!   into [`AppError`](kabphone_core::AppError), and runs the registered
//!   policy on every 401
//! - `policy`: the 401 policy seam and the force-logout policy
//! - `api`: typed wrappers for the backend endpoints

pub mod api;
pub mod gateway;
pub mod policy;

pub use api::{CartApi, OrderApi, PhoneApi, UserApi};
pub use gateway::{Gateway, RequestInfo};
pub use policy::{ForceLogout, UnauthorizedPolicy};
