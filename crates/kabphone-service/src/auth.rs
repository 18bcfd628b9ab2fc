//! Account actions.

use tracing::{info, warn};

use kabphone_auth::Claims;
use kabphone_auth::guard::Route;
use kabphone_client::UserApi;
use kabphone_core::error::AppError;
use kabphone_core::result::AppResult;
use kabphone_entity::user::{LoginRequest, RegisterRequest};

use crate::context::{ServiceContext, display_message};

/// Drives the login and registration forms and the logout button.
#[derive(Debug, Clone)]
pub struct AuthService {
    ctx: ServiceContext,
    users: UserApi,
}

impl AuthService {
    /// Create the service.
    pub fn new(ctx: ServiceContext, users: UserApi) -> Self {
        Self { ctx, users }
    }

    /// Exchange credentials for a token, store the session, and go home.
    ///
    /// A token whose payload cannot be decoded counts as a failed login and
    /// nothing is stored. Unlike other calls, a 401 here is shown to the
    /// user: the backend answers a wrong password with 401.
    pub async fn login(&self, request: &LoginRequest) -> AppResult<Claims> {
        let result = async {
            let response = self.users.login(request).await?;
            self.ctx.session.establish(&response.access_token)
        }
        .await;

        match result {
            Ok(claims) => {
                self.ctx.cache.clear();
                info!(username = %request.username, role = ?claims.role, "Logged in");
                self.ctx.navigator.push(&Route::Home.path());
                Ok(claims)
            }
            Err(err) => {
                warn!(username = %request.username, error = %err, "Login failed");
                self.ctx.notifier.error(&login_failure(&err));
                Err(err)
            }
        }
    }

    /// Create an account, then go to the login view.
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<()> {
        if let Err(err) = request.validate() {
            self.ctx.notifier.error(&err.message);
            return Err(err);
        }

        match self.users.register(request).await {
            Ok(_) => {
                info!(username = %request.username, "Registered");
                self.ctx.notifier.success("Registration successful!");
                self.ctx.navigator.push(&Route::Login.path());
                Ok(())
            }
            Err(err) => {
                self.ctx.notifier.error(&display_message(
                    &err.info(),
                    "Registration failed. Please try again.",
                ));
                Err(err)
            }
        }
    }

    /// Tell the server, then drop the local session regardless of whether
    /// the server heard about it.
    pub async fn logout(&self) {
        if self.ctx.is_authenticated() {
            if let Err(err) = self.users.logout().await {
                warn!(error = %err, "Logout notification failed");
            }
        }
        self.ctx.session.clear_session();
        self.ctx.cache.clear();
        info!("Logged out");
        self.ctx.notifier.success("Logged out successfully");
        self.ctx.navigator.push(&Route::Home.path());
    }
}

fn login_failure(err: &AppError) -> String {
    if err.is_token_error() {
        format!("Login failed: {}", err.message)
    } else {
        display_message(&err.info(), "An error occurred during login")
    }
}
