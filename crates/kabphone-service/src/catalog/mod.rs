//! The product grid and the admin product form.

pub mod admin;
pub mod listing;

pub use admin::ProductAdmin;
pub use listing::ProductListing;
