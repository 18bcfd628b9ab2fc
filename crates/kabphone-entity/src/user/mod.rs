//! User domain entities.

pub mod model;
pub mod request;
pub mod role;

pub use model::User;
pub use request::{LoginRequest, RegisterRequest, UpdateProfileRequest};
pub use role::UserRole;
