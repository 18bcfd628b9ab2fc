//! Client-side navigation.

/// How a navigation affects history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Append a history entry.
    Push,
    /// Replace the current entry, so "back" cannot return to it.
    Replace,
}

/// Moves the client between routes.
pub trait Navigator: Send + Sync + std::fmt::Debug + 'static {
    /// Navigate to `path`.
    fn navigate(&self, path: &str, mode: NavigationMode);

    /// The path currently displayed.
    fn current(&self) -> String;

    /// Navigate, appending to history.
    fn push(&self, path: &str) {
        self.navigate(path, NavigationMode::Push);
    }

    /// Navigate, replacing the current history entry.
    fn replace(&self, path: &str) {
        self.navigate(path, NavigationMode::Replace);
    }
}
