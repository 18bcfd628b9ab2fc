//! Collaborators shared by every storefront service.

use std::sync::Arc;

use kabphone_auth::SessionStore;
use kabphone_cache::{Mutation, QueryCache, QueryKey};
use kabphone_core::config::QueryConfig;
use kabphone_core::error::{ErrorInfo, GENERIC_SERVER_MESSAGE};
use kabphone_core::traits::Navigator;
use kabphone_core::types::MessageBody;

use crate::notify::Notifier;

/// Handles a service needs besides its endpoint API.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// Current session.
    pub session: Arc<SessionStore>,
    /// Shared query cache.
    pub cache: QueryCache,
    /// Client navigation.
    pub navigator: Arc<dyn Navigator>,
    /// Toast sink.
    pub notifier: Arc<dyn Notifier>,
    /// Page sizes and debounce delay.
    pub query: QueryConfig,
}

impl ServiceContext {
    /// Bundle the collaborators.
    pub fn new(
        session: Arc<SessionStore>,
        cache: QueryCache,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        query: QueryConfig,
    ) -> Self {
        Self {
            session,
            cache,
            navigator,
            notifier,
            query,
        }
    }

    /// Whether a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.session.snapshot().is_authenticated()
    }

    /// Attach the usual settlement callbacks to a write that answers with
    /// a message body: invalidate `keys` and toast the server's message on
    /// success, toast the server's message or `fallback` on failure.
    pub(crate) fn message_mutation<I>(
        &self,
        mutation: Mutation<I, MessageBody>,
        keys: Vec<QueryKey>,
        fallback: &'static str,
    ) -> Mutation<I, MessageBody>
    where
        I: Clone + Send + Sync + 'static,
    {
        let cache = self.cache.clone();
        let ok = Arc::clone(&self.notifier);
        let failed = Arc::clone(&self.notifier);
        mutation
            .on_success(move |body: &MessageBody, _| {
                for key in &keys {
                    cache.invalidate(key);
                }
                ok.success(&body.message);
            })
            .on_error(move |error: &ErrorInfo, _| failed.error(&display_message(error, fallback)))
    }
}

/// The server's message, unless it is the gateway's generic status text.
pub(crate) fn display_message(error: &ErrorInfo, fallback: &str) -> String {
    if error.message.is_empty() || error.message.starts_with(GENERIC_SERVER_MESSAGE) {
        fallback.to_string()
    } else {
        error.message.clone()
    }
}
