//! Volatile session storage.

use std::collections::HashMap;
use std::sync::RwLock;

use kabphone_core::result::AppResult;
use kabphone_core::traits::SessionStorage;

/// Session storage that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> AppResult<()> {
        let mut map = self.entries.write().unwrap_or_else(|e| e.into_inner());
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        Ok(())
    }
}
