//! Shared cache of server data keyed by [`QueryKey`].
//!
//! Each key owns a slot holding the current [`QueryEntry`], the fetcher
//! registered by its observers, and a watch channel that pushes every entry
//! change to those observers. Fetches run on spawned tasks; each one is
//! tagged with a generation drawn from a cache-wide counter, and a response
//! is applied only while its generation is still the slot's latest.
//!
//! Slots without observers stay cached so a remount can reuse their data,
//! up to a limit; past it the least recently fetched idle ones are evicted.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info};

use kabphone_core::config::QueryConfig;
use kabphone_core::result::AppResult;
use kabphone_core::traits::SessionScoped;

use super::entry::{QueryEntry, QueryStatus};
use super::observer::{QueryObserver, QueryOptions};
use super::Fetcher;
use crate::keys::QueryKey;

const DEFAULT_MAX_UNOBSERVED: usize = 64;

struct Slot {
    entry: QueryEntry,
    /// Generation of the fetch whose result may still be applied. Zero
    /// means no fetch is expected.
    generation: u64,
    observers: usize,
    /// Observers counted in `observers` that were mounted enabled.
    enabled_observers: usize,
    fetcher: Option<Fetcher>,
    fetched_instant: Option<Instant>,
    tx: watch::Sender<QueryEntry>,
}

impl Slot {
    fn new(key: QueryKey) -> Self {
        let entry = QueryEntry::idle(key);
        let (tx, _) = watch::channel(entry.clone());
        Self {
            entry,
            generation: 0,
            observers: 0,
            enabled_observers: 0,
            fetcher: None,
            fetched_instant: None,
            tx,
        }
    }

    fn needs_fetch(&self, stale_time: Option<Duration>) -> bool {
        if self.entry.is_fetching {
            return false;
        }
        let expired = match (stale_time, self.fetched_instant) {
            (Some(ttl), Some(at)) => at.elapsed() >= ttl,
            _ => false,
        };
        self.entry.status == QueryStatus::Idle || self.entry.is_stale || expired
    }

    fn publish(&self) {
        self.tx.send_replace(self.entry.clone());
    }
}

struct CacheInner {
    slots: DashMap<QueryKey, Slot>,
    stale_time: Option<Duration>,
    max_unobserved: usize,
    generations: AtomicU64,
}

/// Cache of server data shared by every storefront view.
///
/// Cloning is cheap; clones share state. Operations that may start a fetch
/// spawn onto the current Tokio runtime and must be called from within one.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<CacheInner>,
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.inner.slots.len())
            .field("stale_time", &self.inner.stale_time)
            .field("max_unobserved", &self.inner.max_unobserved)
            .finish()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(None)
    }
}

impl QueryCache {
    /// Create a cache. With `stale_time` set, successful entries older than
    /// that are refetched when a new observer subscribes; otherwise they stay
    /// fresh until invalidated.
    pub fn new(stale_time: Option<Duration>) -> Self {
        Self::with_limit(stale_time, DEFAULT_MAX_UNOBSERVED)
    }

    /// Create a cache that keeps at most `max_unobserved` entries without
    /// an observer.
    pub fn with_limit(stale_time: Option<Duration>, max_unobserved: usize) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                slots: DashMap::new(),
                stale_time,
                max_unobserved,
                generations: AtomicU64::new(0),
            }),
        }
    }

    /// Create a cache from configuration.
    pub fn from_config(config: &QueryConfig) -> Self {
        Self::with_limit(config.stale_time(), config.max_unobserved_entries)
    }

    /// Subscribe to `key`.
    ///
    /// Starts a fetch when the key has never been fetched or is stale and no
    /// fetch is in flight. Concurrent observers of one key share one fetch.
    pub fn observe(&self, key: QueryKey, fetcher: Fetcher, options: QueryOptions) -> QueryObserver {
        let rx = self.attach(&key, fetcher, options);
        QueryObserver::new(self.clone(), key, options, rx)
    }

    /// Observe `key` until its fetch settles and return the typed result.
    pub async fn fetch<T: DeserializeOwned>(&self, key: QueryKey, fetcher: Fetcher) -> AppResult<T> {
        let mut observer = self.observe(key, fetcher, QueryOptions::default());
        observer.settled().await.result()
    }

    /// Current entry for `key`, if the key was ever observed.
    pub fn get(&self, key: &QueryKey) -> Option<QueryEntry> {
        self.inner.slots.get(key).map(|slot| slot.entry.clone())
    }

    /// Number of cached entries, observed or not.
    pub fn len(&self) -> usize {
        self.inner.slots.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.inner.slots.is_empty()
    }

    /// Number of live observers of `key`.
    pub fn observer_count(&self, key: &QueryKey) -> usize {
        self.inner.slots.get(key).map_or(0, |slot| slot.observers)
    }

    /// Mark every entry whose key starts with `prefix` as stale.
    ///
    /// Entries with a mounted, enabled observer are refetched right away,
    /// superseding any fetch already in flight. Others are refetched the
    /// next time they are observed. Returns the number of matched entries.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let keys: Vec<QueryKey> = self
            .inner
            .slots
            .iter()
            .filter(|slot| slot.key().starts_with(prefix))
            .map(|slot| slot.key().clone())
            .collect();

        for key in &keys {
            let refetch = match self.inner.slots.get_mut(key) {
                Some(mut slot) => {
                    slot.entry.is_stale = true;
                    slot.publish();
                    slot.enabled_observers > 0 && slot.fetcher.is_some()
                }
                None => false,
            };
            if refetch {
                self.start_fetch(key);
            }
        }

        debug!(prefix = %prefix, matched = keys.len(), "Invalidated queries");
        keys.len()
    }

    /// Fetch `key` again with its registered fetcher. Joins a fetch that is
    /// already in flight instead of starting another.
    pub fn refetch(&self, key: &QueryKey) {
        let start = self
            .inner
            .slots
            .get(key)
            .is_some_and(|slot| !slot.entry.is_fetching && slot.fetcher.is_some());
        if start {
            self.start_fetch(key);
        }
    }

    /// Drop all cached data.
    ///
    /// Unobserved entries are removed. Observed entries return to idle and
    /// any in-flight response for them is discarded on arrival.
    pub fn clear(&self) {
        self.inner.slots.retain(|_, slot| slot.observers > 0);
        for mut slot in self.inner.slots.iter_mut() {
            slot.generation = 0;
            slot.fetched_instant = None;
            slot.entry = QueryEntry::idle(slot.entry.key.clone());
            slot.publish();
        }
        info!(observed = self.inner.slots.len(), "Query cache cleared");
    }

    pub(crate) fn attach(
        &self,
        key: &QueryKey,
        fetcher: Fetcher,
        options: QueryOptions,
    ) -> watch::Receiver<QueryEntry> {
        let (rx, fetch) = {
            let mut slot = self
                .inner
                .slots
                .entry(key.clone())
                .or_insert_with(|| Slot::new(key.clone()));
            slot.observers += 1;
            if options.enabled {
                slot.enabled_observers += 1;
            }
            slot.fetcher = Some(fetcher);
            let fetch = options.enabled && slot.needs_fetch(self.inner.stale_time);
            (slot.tx.subscribe(), fetch)
        };
        if fetch {
            self.start_fetch(key);
        }
        rx
    }

    /// Release one observer of `key` that was attached with `options`.
    pub(crate) fn detach(&self, key: &QueryKey, options: QueryOptions) {
        let unobserved = match self.inner.slots.get_mut(key) {
            Some(mut slot) => {
                slot.observers = slot.observers.saturating_sub(1);
                if options.enabled {
                    slot.enabled_observers = slot.enabled_observers.saturating_sub(1);
                }
                slot.observers == 0
            }
            None => false,
        };
        if unobserved {
            self.evict_unobserved();
        }
    }

    /// Drop the least recently fetched unobserved entries beyond the limit.
    /// Entries with a fetch in flight are kept until it settles.
    fn evict_unobserved(&self) {
        let mut idle: Vec<(Option<Instant>, QueryKey)> = Vec::new();
        let mut unobserved = 0;
        for slot in self.inner.slots.iter() {
            if slot.observers > 0 {
                continue;
            }
            unobserved += 1;
            if !slot.entry.is_fetching {
                idle.push((slot.fetched_instant, slot.key().clone()));
            }
        }
        if unobserved <= self.inner.max_unobserved {
            return;
        }

        // Never-fetched entries sort first.
        idle.sort_by_key(|(at, _)| *at);
        let excess = unobserved - self.inner.max_unobserved;
        let mut evicted = 0;
        for (_, key) in idle.into_iter().take(excess) {
            if self
                .inner
                .slots
                .remove_if(&key, |_, slot| slot.observers == 0 && !slot.entry.is_fetching)
                .is_some()
            {
                evicted += 1;
            }
        }
        debug!(evicted, remaining = self.inner.slots.len(), "Evicted unobserved queries");
    }

    fn start_fetch(&self, key: &QueryKey) {
        let generation = self.inner.generations.fetch_add(1, Ordering::Relaxed) + 1;
        let fetcher = {
            let Some(mut slot) = self.inner.slots.get_mut(key) else {
                return;
            };
            let Some(fetcher) = slot.fetcher.clone() else {
                return;
            };
            slot.generation = generation;
            slot.entry.is_fetching = true;
            if slot.entry.data.is_none() {
                slot.entry.status = QueryStatus::Pending;
            }
            slot.publish();
            fetcher
        };

        debug!(key = %key, generation, "Fetching query");
        let request = fetcher();
        let cache = self.clone();
        let key = key.clone();
        tokio::spawn(async move {
            let result = request.await;
            cache.settle(&key, generation, result);
        });
    }

    fn settle(&self, key: &QueryKey, generation: u64, result: AppResult<Value>) {
        let Some(mut slot) = self.inner.slots.get_mut(key) else {
            debug!(key = %key, generation, "Discarding response for removed query");
            return;
        };
        if slot.generation != generation {
            debug!(
                key = %key,
                generation,
                current = slot.generation,
                "Discarding superseded response"
            );
            return;
        }

        slot.entry.is_fetching = false;
        match result {
            Ok(data) => {
                slot.entry.status = QueryStatus::Success;
                slot.entry.data = Some(data);
                slot.entry.error = None;
                slot.entry.failure = None;
                slot.entry.fetched_at = Some(Utc::now());
                slot.entry.is_stale = false;
                slot.fetched_instant = Some(Instant::now());
                debug!(key = %key, generation, "Query succeeded");
            }
            Err(err) if err.is_unauthorized() => {
                // The gateway's 401 policy owns this failure; nothing to display.
                slot.entry.status = if slot.entry.data.is_some() {
                    QueryStatus::Success
                } else {
                    QueryStatus::Idle
                };
                slot.entry.error = None;
                slot.entry.is_stale = true;
                slot.entry.failure = Some(err);
                debug!(key = %key, generation, "Query rejected as unauthorized");
            }
            Err(err) => {
                debug!(key = %key, generation, error = %err, "Query failed");
                slot.entry.status = QueryStatus::Error;
                slot.entry.error = Some(err.info());
                slot.entry.failure = Some(err);
            }
        }
        slot.publish();
    }
}

impl SessionScoped for QueryCache {
    fn scope_name(&self) -> &'static str {
        "query-cache"
    }

    fn reset(&self) {
        self.clear();
    }
}
