//! `/users` endpoints.

use std::sync::Arc;

use kabphone_core::result::AppResult;
use kabphone_core::types::{Envelope, MessageBody, TokenResponse};
use kabphone_entity::user::{LoginRequest, RegisterRequest, UpdateProfileRequest, User};

use crate::gateway::Gateway;

/// Account and profile calls.
#[derive(Debug, Clone)]
pub struct UserApi {
    gateway: Arc<Gateway>,
}

impl UserApi {
    /// Create the API over `gateway`.
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// `POST /users/login`.
    pub async fn login(&self, request: &LoginRequest) -> AppResult<TokenResponse> {
        self.gateway.post("/users/login", request).await
    }

    /// `POST /users/register`.
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<MessageBody> {
        self.gateway.post("/users/register", request).await
    }

    /// `POST /users/logout`.
    pub async fn logout(&self) -> AppResult<MessageBody> {
        self.gateway
            .post("/users/logout", &serde_json::json!({}))
            .await
    }

    /// `GET /users/profile`.
    pub async fn profile(&self) -> AppResult<User> {
        let envelope: Envelope<User> = self.gateway.get("/users/profile").await?;
        Ok(envelope.data)
    }

    /// `PUT /users`.
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> AppResult<MessageBody> {
        self.gateway.put("/users", request).await
    }
}
