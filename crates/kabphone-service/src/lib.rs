//! # kabphone-service
//!
//! Storefront services. Each service stands in for one view of the
//! storefront: it subscribes to the queries the view renders, exposes the
//! derived state, and dispatches the view's mutations along with their
//! follow-up invalidations.
//!
//! Services follow constructor injection. Shared collaborators travel in a
//! [`ServiceContext`]; endpoint wrappers are passed in by value.

pub mod analytics;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod context;
pub mod notify;
pub mod orders;
pub mod profile;

#[cfg(test)]
mod testing;

pub use analytics::{IncomeReport, SalesRanking};
pub use auth::AuthService;
pub use cart::CartView;
pub use catalog::{ProductAdmin, ProductListing};
pub use context::ServiceContext;
pub use notify::{Notifier, RecordingNotifier, Toast, ToastLevel, TracingNotifier};
pub use orders::{AdminOrders, OrderHistory, OrderTracking};
pub use profile::ProfileView;
