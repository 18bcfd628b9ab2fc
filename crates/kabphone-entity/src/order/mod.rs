//! Order entities.

pub mod model;
pub mod request;

pub use model::Order;
pub use request::{AddTrackingRequest, UpdateOrderStatus};
