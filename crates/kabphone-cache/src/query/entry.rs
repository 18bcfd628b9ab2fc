//! Cached state of a single query key.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use kabphone_core::error::{AppError, ErrorInfo};
use kabphone_core::result::AppResult;

use crate::keys::QueryKey;

/// Lifecycle of a query entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Never fetched, disabled, or reset.
    Idle,
    /// The first fetch is in flight and no data exists yet.
    Pending,
    /// The last fetch succeeded.
    Success,
    /// The last fetch failed.
    Error,
}

/// What observers of a key see.
#[derive(Debug, Clone)]
pub struct QueryEntry {
    /// The key this entry belongs to.
    pub key: QueryKey,
    /// Current lifecycle state.
    pub status: QueryStatus,
    /// JSON produced by the last successful fetch.
    pub data: Option<Value>,
    /// Displayable failure of the last fetch. Never set for a 401.
    pub error: Option<ErrorInfo>,
    /// When `data` was fetched.
    pub fetched_at: Option<DateTime<Utc>>,
    /// Marked stale by an invalidation and not yet refetched.
    pub is_stale: bool,
    /// A fetch for this key is in flight.
    pub is_fetching: bool,
    pub(crate) failure: Option<AppError>,
}

impl QueryEntry {
    pub(crate) fn idle(key: QueryKey) -> Self {
        Self {
            key,
            status: QueryStatus::Idle,
            data: None,
            error: None,
            fetched_at: None,
            is_stale: false,
            is_fetching: false,
            failure: None,
        }
    }

    /// No data yet and a fetch is running.
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Pending
    }

    /// Whether the last fetch succeeded.
    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    /// Whether the last fetch failed with a displayable error.
    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    /// Deserialize the cached data, if any.
    pub fn decode<T: DeserializeOwned>(&self) -> AppResult<Option<T>> {
        self.data
            .clone()
            .map(serde_json::from_value)
            .transpose()
            .map_err(AppError::from)
    }

    /// The data as `T`, or the failure of the last fetch.
    ///
    /// Unlike [`error`](Self::error), this also reports a 401.
    pub fn result<T: DeserializeOwned>(&self) -> AppResult<T> {
        if let Some(failure) = self.failure.as_ref().filter(|_| self.data.is_none() || self.is_error()) {
            return Err(failure.clone());
        }
        self.decode()?.ok_or_else(|| {
            AppError::internal(format!("Query {} has no data", self.key))
        })
    }
}
