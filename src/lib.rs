//! # kabphone
//!
//! KabPhone storefront client. The [`Storefront`] wires the session store,
//! navigator, query cache, HTTP gateway with its 401 policy, route guard,
//! and storefront services into one object graph.

pub mod storefront;

pub use storefront::Storefront;
