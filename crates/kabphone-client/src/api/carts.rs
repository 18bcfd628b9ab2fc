//! `/carts` endpoints.

use std::sync::Arc;

use kabphone_core::result::AppResult;
use kabphone_core::types::{Envelope, MessageBody};
use kabphone_entity::cart::{AddItemRequest, Cart, UpdateItemRequest};

use crate::gateway::Gateway;

/// Cart calls. All require a token.
#[derive(Debug, Clone)]
pub struct CartApi {
    gateway: Arc<Gateway>,
}

impl CartApi {
    /// Create the API over `gateway`.
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// `GET /carts/`.
    pub async fn get(&self) -> AppResult<Cart> {
        let envelope: Envelope<Cart> = self.gateway.get("/carts/").await?;
        Ok(envelope.data)
    }

    /// `POST /carts/items`.
    pub async fn add_item(&self, phone_id: u64, amount: i64) -> AppResult<MessageBody> {
        self.gateway
            .post("/carts/items", &AddItemRequest::new(phone_id, amount))
            .await
    }

    /// `PATCH /carts/items/:id`.
    pub async fn update_item(&self, item_id: u64, amount: i64) -> AppResult<MessageBody> {
        self.gateway
            .patch(
                &format!("/carts/items/{item_id}"),
                &UpdateItemRequest { amount },
            )
            .await
    }

    /// `DELETE /carts/items/:id`.
    pub async fn remove_item(&self, item_id: u64) -> AppResult<MessageBody> {
        self.gateway
            .delete(&format!("/carts/items/{item_id}"))
            .await
    }
}
