//! Seam traits between the client layers.

pub mod navigator;
pub mod scoped;
pub mod storage;

pub use navigator::{NavigationMode, Navigator};
pub use scoped::SessionScoped;
pub use storage::SessionStorage;
