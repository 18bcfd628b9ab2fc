//! The single owner of the client's session.

use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use kabphone_core::error::AppError;
use kabphone_core::result::AppResult;
use kabphone_core::traits::SessionStorage;
use kabphone_entity::user::UserRole;

use super::backend::MemorySessionStorage;
use crate::jwt::{Claims, decode_token};

/// Storage key of the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the JSON-encoded claims.
pub const CLAIMS_KEY: &str = "user";

/// A point-in-time copy of the session.
///
/// `claims` is present exactly when `token` is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// The bearer token, if logged in.
    pub token: Option<String>,
    /// Claims decoded from `token`.
    pub claims: Option<Claims>,
}

impl Session {
    /// A session with nobody logged in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Whether a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The role claim, if any.
    pub fn role(&self) -> Option<&UserRole> {
        self.claims.as_ref().and_then(|c| c.role.as_ref())
    }

    /// Whether the role claim is `admin`.
    pub fn is_admin(&self) -> bool {
        self.claims.as_ref().is_some_and(Claims::is_admin)
    }
}

/// Holds the current token and claims and mirrors them to persistent storage.
///
/// Readers never fail: they see the in-memory copy. Writers persist first
/// and only then update memory, so a storage failure leaves the previous
/// session in place.
#[derive(Debug)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    state: RwLock<Session>,
}

impl SessionStore {
    /// Create a store over `storage`, restoring any persisted session.
    ///
    /// A persisted token that no longer decodes is discarded together with
    /// the rest of the stored state.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let state = restore(storage.as_ref());
        Self {
            storage,
            state: RwLock::new(state),
        }
    }

    /// A store whose state disappears with the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStorage::new()))
    }

    /// Persist `token` together with its `claims`.
    ///
    /// Fails with `InvalidToken` when the claims carry no role; nothing is
    /// written in that case.
    pub fn set_session(&self, token: &str, claims: Claims) -> AppResult<()> {
        if claims.role.as_ref().is_none_or(|r| r.as_str().is_empty()) {
            return Err(AppError::invalid_token("Invalid role in token"));
        }

        let encoded = serde_json::to_string(&claims)?;
        self.storage
            .set_many(&[(TOKEN_KEY, token), (CLAIMS_KEY, &encoded)])?;

        info!(role = ?claims.role, subject = ?claims.subject_id, "Session established");
        *self.write_state() = Session {
            token: Some(token.to_string()),
            claims: Some(claims),
        };
        Ok(())
    }

    /// Decode `raw_token` and store it. Returns the decoded claims.
    ///
    /// A token that fails to decode is never persisted.
    pub fn establish(&self, raw_token: &str) -> AppResult<Claims> {
        let claims = decode_token(raw_token)?;
        self.set_session(raw_token, claims.clone())?;
        Ok(claims)
    }

    /// The current bearer token.
    pub fn get_token(&self) -> Option<String> {
        self.read_state().token.clone()
    }

    /// The current claims.
    pub fn get_claims(&self) -> Option<Claims> {
        self.read_state().claims.clone()
    }

    /// A copy of the whole session.
    pub fn snapshot(&self) -> Session {
        self.read_state().clone()
    }

    /// Forget the session and every other entry in persistent storage.
    ///
    /// The in-memory session is always cleared; a storage failure is logged.
    pub fn clear_session(&self) {
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "Failed to clear persisted session state");
        }
        let mut state = self.write_state();
        if state.token.is_some() {
            info!("Session cleared");
        }
        *state = Session::anonymous();
    }

    /// The backing storage, for components that keep auxiliary state there.
    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn restore(storage: &dyn SessionStorage) -> Session {
    let token = match storage.get(TOKEN_KEY) {
        Ok(Some(token)) => token,
        Ok(None) => return Session::anonymous(),
        Err(e) => {
            warn!(error = %e, "Failed to read persisted session");
            return Session::anonymous();
        }
    };

    match decode_token(&token) {
        Ok(claims) => Session {
            token: Some(token),
            claims: Some(claims),
        },
        Err(e) => {
            warn!(error = %e, "Discarding persisted token that no longer decodes");
            if let Err(e) = storage.clear() {
                warn!(error = %e, "Failed to clear persisted session state");
            }
            Session::anonymous()
        }
    }
}
