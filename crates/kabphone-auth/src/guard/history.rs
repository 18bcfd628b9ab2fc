//! An in-process navigation history.

use std::sync::Mutex;

use tracing::debug;

use kabphone_core::traits::{NavigationMode, Navigator};

/// A history stack standing in for the browser's.
#[derive(Debug)]
pub struct HistoryNavigator {
    entries: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    /// A history holding only `/`.
    pub fn new() -> Self {
        Self::starting_at("/")
    }

    /// A history holding only `path`.
    pub fn starting_at(path: &str) -> Self {
        Self {
            entries: Mutex::new(vec![path.to_string()]),
        }
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Step back one entry. Returns the new current path, or `None` when
    /// already at the first entry.
    pub fn back(&self) -> Option<String> {
        let mut entries = self.lock();
        if entries.len() <= 1 {
            return None;
        }
        entries.pop();
        entries.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, path: &str, mode: NavigationMode) {
        let mut entries = self.lock();
        match mode {
            NavigationMode::Push => entries.push(path.to_string()),
            NavigationMode::Replace => match entries.last_mut() {
                Some(last) => *last = path.to_string(),
                None => entries.push(path.to_string()),
            },
        }
        debug!(path, ?mode, depth = entries.len(), "Navigated");
    }

    fn current(&self) -> String {
        self.lock().last().cloned().unwrap_or_else(|| "/".to_string())
    }
}
