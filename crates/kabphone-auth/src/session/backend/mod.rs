//! Persistence backends for session state.

pub mod file;
pub mod memory;

use std::sync::Arc;

use tracing::info;

use kabphone_core::config::SessionConfig;
use kabphone_core::error::AppError;
use kabphone_core::result::AppResult;
use kabphone_core::traits::SessionStorage;

pub use file::FileSessionStorage;
pub use memory::MemorySessionStorage;

/// Build the storage backend selected by configuration.
pub fn from_config(config: &SessionConfig) -> AppResult<Arc<dyn SessionStorage>> {
    match config.backend.as_str() {
        "file" => {
            info!(path = %config.path, "Using file-backed session storage");
            Ok(Arc::new(FileSessionStorage::open(&config.path)?))
        }
        "memory" => {
            info!("Using in-memory session storage");
            Ok(Arc::new(MemorySessionStorage::new()))
        }
        other => Err(AppError::configuration(format!(
            "Unknown session backend: '{other}'. Supported: file, memory"
        ))),
    }
}
