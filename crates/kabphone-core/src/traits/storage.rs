//! Persistent client-side storage for session state.

use crate::result::AppResult;

/// Key/value storage that survives restarts (the client's "local storage").
///
/// Values are strings; structured values are stored as JSON. Implementations
/// must apply [`SessionStorage::set_many`] atomically so that a token is never
/// persisted without its claims.
pub trait SessionStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write several entries in one step.
    fn set_many(&self, entries: &[(&str, &str)]) -> AppResult<()>;

    /// Write a single entry.
    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.set_many(&[(key, value)])
    }

    /// Remove a single entry. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;

    /// Remove every entry, including auxiliary state written by other
    /// components.
    fn clear(&self) -> AppResult<()>;
}
