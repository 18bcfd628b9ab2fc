//! Route guard: decides whether a navigation may proceed.
//!
//! The decision is taken from a fresh session snapshot on every call, so a
//! logout between two navigations is always observed.

use std::sync::Arc;

use tracing::{debug, info};

use kabphone_core::error::AppError;
use kabphone_core::result::AppResult;
use kabphone_core::traits::Navigator;

use super::route::{Route, RouteRequirement};
use crate::session::{Session, SessionStore};

/// Outcome of a guarded navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The requested view is shown.
    Allow,
    /// The requested view is blocked; the client was sent here instead.
    Redirect(Route),
}

impl GuardDecision {
    /// Whether the navigation went through.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Whether `session` satisfies `requirement`.
pub fn can_access(requirement: RouteRequirement, session: &Session) -> bool {
    match requirement {
        RouteRequirement::Public => true,
        RouteRequirement::Authenticated => session.is_authenticated(),
        RouteRequirement::AdminOnly => session.is_admin(),
    }
}

/// Gates navigation on the current session.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    /// Create a guard over `session` that drives `navigator`.
    pub fn new(session: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    /// Decide without navigating.
    pub fn check(&self, route: &Route) -> GuardDecision {
        let session = self.session.snapshot();
        if can_access(route.requirement(), &session) {
            return GuardDecision::Allow;
        }
        match route.requirement() {
            RouteRequirement::AdminOnly => GuardDecision::Redirect(Route::Home),
            _ => GuardDecision::Redirect(Route::Login),
        }
    }

    /// Navigate to `route`, or replace the current entry with the redirect
    /// target when the session does not satisfy the route.
    pub fn navigate(&self, route: &Route) -> GuardDecision {
        let decision = self.check(route);
        match decision {
            GuardDecision::Allow => {
                debug!(route = %route, "Navigation allowed");
                self.navigator.push(&route.path());
            }
            GuardDecision::Redirect(target) => {
                info!(route = %route, redirect = %target, "Navigation blocked by route guard");
                self.navigator.replace(&target.path());
            }
        }
        decision
    }

    /// [`navigate`](Self::navigate) by path.
    pub fn navigate_path(&self, path: &str) -> AppResult<GuardDecision> {
        let route =
            Route::parse(path).ok_or_else(|| AppError::validation(format!("Unknown route: {path}")))?;
        Ok(self.navigate(&route))
    }

    /// The navigator this guard drives.
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }
}
