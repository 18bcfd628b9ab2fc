//! `/orders` endpoints.

use std::sync::Arc;

use kabphone_core::result::AppResult;
use kabphone_core::types::{Envelope, MessageBody, PageEnvelope, PageQuery};
use kabphone_entity::analytics::{BestWorstPhones, TotalIncome};
use kabphone_entity::order::{AddTrackingRequest, Order, UpdateOrderStatus};

use super::path_segment;
use crate::gateway::Gateway;

/// Order endpoints, including the admin analytics.
#[derive(Debug, Clone)]
pub struct OrderApi {
    gateway: Arc<Gateway>,
}

impl OrderApi {
    /// Create the API over `gateway`.
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// `POST /orders/confirm`: turn the current cart into an order.
    pub async fn confirm(&self) -> AppResult<MessageBody> {
        self.gateway
            .post("/orders/confirm", &serde_json::json!({}))
            .await
    }

    /// `GET /orders/track-orders?page&page_size`: the user's order history.
    pub async fn history(&self, query: &PageQuery) -> AppResult<Vec<Order>> {
        let envelope: PageEnvelope<Order> = self
            .gateway
            .get_with_query("/orders/track-orders", query)
            .await?;
        Ok(envelope.data)
    }

    /// `GET /orders/track-orders/:tracking_number`.
    pub async fn track(&self, tracking_number: &str) -> AppResult<Order> {
        let envelope: Envelope<Order> = self
            .gateway
            .get(&format!(
                "/orders/track-orders/{}",
                path_segment(tracking_number)
            ))
            .await?;
        Ok(envelope.data)
    }

    /// `GET /orders/check-order`: every order (admin).
    pub async fn all(&self) -> AppResult<Vec<Order>> {
        let envelope: PageEnvelope<Order> = self.gateway.get("/orders/check-order").await?;
        Ok(envelope.data)
    }

    /// `PUT /orders/:id` with `{isDelivered}` (admin).
    pub async fn set_delivered(&self, order_id: u64, is_delivered: bool) -> AppResult<MessageBody> {
        self.gateway
            .put(
                &format!("/orders/{order_id}"),
                &UpdateOrderStatus { is_delivered },
            )
            .await
    }

    /// `POST /orders/add-tracking` (admin).
    pub async fn add_tracking(&self, request: &AddTrackingRequest) -> AppResult<MessageBody> {
        self.gateway.post("/orders/add-tracking", request).await
    }

    /// `GET /orders/total-income` (admin).
    pub async fn total_income(&self) -> AppResult<TotalIncome> {
        let envelope: Envelope<TotalIncome> = self.gateway.get("/orders/total-income").await?;
        Ok(envelope.data)
    }

    /// `GET /orders/best-worst-phones`.
    pub async fn best_worst(&self) -> AppResult<BestWorstPhones> {
        let envelope: Envelope<BestWorstPhones> =
            self.gateway.get("/orders/best-worst-phones").await?;
        Ok(envelope.data)
    }
}
