//! Query cache and listing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tuning for the query cache and the paginated views built on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Quiet period before a typed search term becomes part of a query key.
    #[serde(default = "default_debounce")]
    pub search_debounce_ms: u64,
    /// Products per page on the storefront listing.
    #[serde(default = "default_product_page_size")]
    pub product_page_size: u32,
    /// Orders per page on the order history.
    #[serde(default = "default_order_page_size")]
    pub order_page_size: u32,
    /// Age after which a successful entry counts as stale on its own.
    /// Unset means entries only go stale through invalidation.
    #[serde(default)]
    pub stale_time_seconds: Option<u64>,
    /// Entries kept in memory with no observer before the oldest are evicted.
    #[serde(default = "default_max_unobserved_entries")]
    pub max_unobserved_entries: usize,
}

impl QueryConfig {
    /// Debounce delay as a [`Duration`].
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Stale time as a [`Duration`], if configured.
    pub fn stale_time(&self) -> Option<Duration> {
        self.stale_time_seconds.map(Duration::from_secs)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_debounce(),
            product_page_size: default_product_page_size(),
            order_page_size: default_order_page_size(),
            stale_time_seconds: None,
            max_unobserved_entries: default_max_unobserved_entries(),
        }
    }
}

fn default_debounce() -> u64 {
    1000
}

fn default_product_page_size() -> u32 {
    8
}

fn default_order_page_size() -> u32 {
    4
}

fn default_max_unobserved_entries() -> usize {
    64
}
