//! Product catalog entities.

pub mod form;
pub mod phone;

pub use form::{ImageUpload, PhoneForm};
pub use phone::Phone;
