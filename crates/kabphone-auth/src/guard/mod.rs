//! Client-side route gating.

pub mod enforcer;
pub mod history;
pub mod route;

pub use enforcer::{GuardDecision, RouteGuard, can_access};
pub use history::HistoryNavigator;
pub use route::{Route, RouteRequirement};
