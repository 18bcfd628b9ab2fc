//! Observer handles returned by [`QueryCache::observe`].

use serde::de::DeserializeOwned;
use tokio::sync::watch;

use kabphone_core::error::ErrorInfo;
use kabphone_core::result::AppResult;

use super::Fetcher;
use super::cache::QueryCache;
use super::entry::{QueryEntry, QueryStatus};
use crate::keys::QueryKey;

/// Per-observer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// A disabled observer keeps its subscription but never causes a fetch.
    pub enabled: bool,
}

impl QueryOptions {
    /// Options for an observer that should not fetch.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Enabled when `enabled` is true.
    pub fn enabled_if(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// A view's subscription to one query key. Dropping it unsubscribes.
#[derive(Debug)]
pub struct QueryObserver {
    cache: QueryCache,
    key: QueryKey,
    options: QueryOptions,
    rx: watch::Receiver<QueryEntry>,
}

impl QueryObserver {
    pub(crate) fn new(
        cache: QueryCache,
        key: QueryKey,
        options: QueryOptions,
        rx: watch::Receiver<QueryEntry>,
    ) -> Self {
        Self {
            cache,
            key,
            options,
            rx,
        }
    }

    /// The observed key.
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// The latest entry.
    pub fn entry(&self) -> QueryEntry {
        self.rx.borrow().clone()
    }

    /// Lifecycle state of the latest entry.
    pub fn status(&self) -> QueryStatus {
        self.rx.borrow().status
    }

    /// Displayable error of the latest entry.
    pub fn error(&self) -> Option<ErrorInfo> {
        self.rx.borrow().error.clone()
    }

    /// Typed data of the latest entry.
    pub fn data<T: DeserializeOwned>(&self) -> AppResult<Option<T>> {
        self.rx.borrow().decode()
    }

    /// A receiver for the current key's entry. It does not follow later
    /// [`set_key`](Self::set_key) calls.
    pub fn watch(&self) -> watch::Receiver<QueryEntry> {
        self.rx.clone()
    }

    /// Manual retry. Joins a fetch already in flight.
    pub fn refetch(&self) {
        self.cache.refetch(&self.key);
    }

    /// Wait for the next entry change.
    pub async fn changed(&mut self) -> QueryEntry {
        // The sender lives in the slot, which outlives this subscription.
        let _ = self.rx.changed().await;
        self.rx.borrow_and_update().clone()
    }

    /// Wait until no fetch is in flight and return the entry.
    pub async fn settled(&mut self) -> QueryEntry {
        let settled = self
            .rx
            .wait_for(|entry| !entry.is_fetching)
            .await
            .map(|entry| entry.clone());
        settled.unwrap_or_else(|_| self.rx.borrow().clone())
    }

    /// Switch to another key, as when a page index or search term changes.
    ///
    /// The old key's in-flight fetch keeps running but this observer no
    /// longer sees its result.
    pub fn set_key(&mut self, key: QueryKey, fetcher: Fetcher) {
        self.set_key_with(key, fetcher, self.options);
    }

    /// [`set_key`](Self::set_key) with new options.
    pub fn set_key_with(&mut self, key: QueryKey, fetcher: Fetcher, options: QueryOptions) {
        if key == self.key && options == self.options {
            return;
        }
        let rx = self.cache.attach(&key, fetcher, options);
        self.cache.detach(&self.key, self.options);
        self.key = key;
        self.options = options;
        self.rx = rx;
    }
}

impl Drop for QueryObserver {
    fn drop(&mut self) {
        self.cache.detach(&self.key, self.options);
    }
}
