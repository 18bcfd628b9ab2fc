//! What happens when the backend answers 401.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use kabphone_auth::SessionStore;
use kabphone_auth::guard::Route;
use kabphone_core::traits::{Navigator, SessionScoped};

use crate::gateway::RequestInfo;

/// Reaction to a 401 response. The gateway calls it exactly once per such
/// response, before the error is returned to the caller.
pub trait UnauthorizedPolicy: Send + Sync + fmt::Debug + 'static {
    /// Handle the 401 answer to `request`.
    fn on_unauthorized(&self, request: &RequestInfo);
}

/// Clears the session and every session-scoped component, then replaces
/// the current view with the login view.
#[derive(Debug)]
pub struct ForceLogout {
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    scoped: Vec<Arc<dyn SessionScoped>>,
}

impl ForceLogout {
    /// Create the policy.
    pub fn new(session: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            session,
            navigator,
            scoped: Vec::new(),
        }
    }

    /// Also reset `component` on every 401.
    pub fn with_scoped(mut self, component: Arc<dyn SessionScoped>) -> Self {
        self.scoped.push(component);
        self
    }
}

impl UnauthorizedPolicy for ForceLogout {
    fn on_unauthorized(&self, request: &RequestInfo) {
        warn!(
            method = %request.method,
            path = %request.path,
            "Server rejected credentials, forcing logout"
        );
        self.session.clear_session();
        for component in &self.scoped {
            component.reset();
            info!(scope = component.scope_name(), "Reset session-scoped state");
        }
        self.navigator.replace(&Route::Login.path());
    }
}
