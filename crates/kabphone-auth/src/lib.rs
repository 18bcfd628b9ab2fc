//! # kabphone-auth
//!
//! Client-side authentication state for the KabPhone storefront.
//!
//! ## Modules
//!
//! - `jwt`: advisory decoding of the bearer token's payload into claims
//! - `session`: the session store and its persistence backends
//! - `guard`: route table and the route guard
//!
//! Nothing here is a security boundary: the token's signature is never
//! verified and the route guard only decides what the client shows. The
//! backend enforces authorization on every call.

pub mod guard;
pub mod jwt;
pub mod session;

pub use guard::{GuardDecision, HistoryNavigator, Route, RouteGuard, RouteRequirement, can_access};
pub use jwt::{Claims, decode_token};
pub use session::{Session, SessionStore};
