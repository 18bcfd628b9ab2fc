//! Session state: the bearer token and the claims decoded from it.

pub mod backend;
pub mod store;

pub use store::{CLAIMS_KEY, Session, SessionStore, TOKEN_KEY};
