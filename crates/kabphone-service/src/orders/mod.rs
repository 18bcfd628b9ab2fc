//! Order views for customers and admins.

pub mod admin;
pub mod history;
pub mod tracking;

pub use admin::AdminOrders;
pub use history::OrderHistory;
pub use tracking::OrderTracking;
