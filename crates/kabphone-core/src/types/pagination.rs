//! Pagination parameters for list endpoints.

use serde::{Deserialize, Serialize};

/// Query parameters for `GET` listings (`page`, `page_size`, `search`).
///
/// Pages are 0-based, matching the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Page number (0-based).
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
    /// Free-text search term; omitted from the query string when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl PageQuery {
    /// Create a page request without a search term.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size: page_size.max(1),
            search: None,
        }
    }

    /// Attach a search term. Blank terms are dropped.
    pub fn with_search(mut self, search: &str) -> Self {
        let trimmed = search.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Whether a page holding `returned` items is full, i.e. a next page may exist.
    pub fn is_full(&self, returned: usize) -> bool {
        returned >= self.page_size as usize
    }
}
