//! The query cache.

pub mod cache;
pub mod entry;
pub mod observer;

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;

use kabphone_core::result::AppResult;

pub use cache::QueryCache;
pub use entry::{QueryEntry, QueryStatus};
pub use observer::{QueryObserver, QueryOptions};

/// Produces a fresh request for a key each time it is called.
pub type Fetcher = Arc<dyn Fn() -> BoxFuture<'static, AppResult<Value>> + Send + Sync>;

/// Wrap a typed async closure as a [`Fetcher`].
///
/// The closure's output is stored as JSON and read back with
/// [`QueryEntry::decode`].
pub fn query_fn<T, F, Fut>(f: F) -> Fetcher
where
    T: Serialize,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<T>> + Send + 'static,
{
    Arc::new(move || {
        f().map(|result| result.and_then(|value| Ok(serde_json::to_value(value)?)))
            .boxed()
    })
}
