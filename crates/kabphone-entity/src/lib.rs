//! # kabphone-entity
//!
//! Models exchanged with the KabPhone backend. Every struct mirrors the JSON
//! the REST API produces or accepts; request payloads carry the client-side
//! validation the storefront forms apply before a call is issued.

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod order;
pub mod user;

pub use analytics::{BestWorstPhones, PhoneSummary, TotalIncome};
pub use cart::{AddItemRequest, Cart, Item, NewItem, UpdateItemRequest};
pub use catalog::{ImageUpload, Phone, PhoneForm};
pub use order::{AddTrackingRequest, Order, UpdateOrderStatus};
pub use user::{LoginRequest, RegisterRequest, UpdateProfileRequest, User, UserRole};
