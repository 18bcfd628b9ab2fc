//! # kabphone-cache
//!
//! Client-side cache of server data for the KabPhone storefront.
//!
//! - `keys`: query keys and the builders for every key the storefront uses
//! - `query`: the [`QueryCache`] with its entries and observer handles
//! - `mutation`: write operations with settlement callbacks
//! - `debounce`: trailing-edge debouncing for search input
//!
//! Views subscribe to a key and receive a [`QueryObserver`]; dropping the
//! observer unsubscribes. The cache fetches each key at most once at a time
//! and only ever applies the most recently started fetch for a key.

pub mod debounce;
pub mod keys;
pub mod mutation;
pub mod query;

pub use debounce::Debouncer;
pub use keys::{KeyPart, QueryKey};
pub use mutation::{Mutation, MutationStatus};
pub use query::{
    Fetcher, QueryCache, QueryEntry, QueryObserver, QueryOptions, QueryStatus, query_fn,
};
