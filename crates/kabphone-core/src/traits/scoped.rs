//! State that belongs to a single authenticated session.

/// A component holding state that must not outlive the session, such as
/// cached server data fetched with the previous user's token.
pub trait SessionScoped: Send + Sync + std::fmt::Debug + 'static {
    /// Short name used in logs.
    fn scope_name(&self) -> &'static str;

    /// Drop all session-bound state.
    fn reset(&self);
}
