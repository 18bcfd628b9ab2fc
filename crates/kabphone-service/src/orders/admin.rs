//! The admin's order board: every order, delivery status, tracking numbers.

use std::sync::Arc;

use kabphone_cache::{Mutation, QueryEntry, QueryObserver, QueryOptions, keys, query_fn};
use kabphone_client::OrderApi;
use kabphone_core::error::{AppError, ErrorInfo};
use kabphone_core::result::AppResult;
use kabphone_core::types::MessageBody;
use kabphone_entity::order::{AddTrackingRequest, Order};

use crate::context::ServiceContext;

/// Lists all orders and applies fulfilment updates.
#[derive(Debug)]
pub struct AdminOrders {
    ctx: ServiceContext,
    observer: QueryObserver,
    set_delivered: Mutation<(u64, bool), MessageBody>,
    add_tracking: Mutation<AddTrackingRequest, MessageBody>,
}

impl AdminOrders {
    /// Mount the board. Must be called from within a Tokio runtime.
    pub fn new(ctx: ServiceContext, orders: OrderApi) -> Self {
        let observer = {
            let orders = orders.clone();
            ctx.cache.observe(
                keys::admin_orders(),
                query_fn(move || {
                    let orders = orders.clone();
                    async move { orders.all().await }
                }),
                QueryOptions::default(),
            )
        };

        let set_delivered = {
            let orders = orders.clone();
            Mutation::new(move |(id, delivered): (u64, bool)| {
                let orders = orders.clone();
                async move { orders.set_delivered(id, delivered).await }
            })
        };
        let add_tracking = Mutation::new(move |request: AddTrackingRequest| {
            let orders = orders.clone();
            async move { orders.add_tracking(&request).await }
        });

        Self {
            set_delivered: fulfilment(&ctx, set_delivered),
            add_tracking: fulfilment(&ctx, add_tracking),
            observer,
            ctx,
        }
    }

    /// The board's entry.
    pub fn entry(&self) -> QueryEntry {
        self.observer.entry()
    }

    /// Every order, once loaded.
    pub fn orders(&self) -> AppResult<Option<Vec<Order>>> {
        self.observer.data()
    }

    /// Wait until the board has no fetch in flight.
    pub async fn settled(&mut self) -> QueryEntry {
        self.observer.settled().await
    }

    /// Retry loading the board.
    pub fn refetch(&self) {
        self.observer.refetch();
    }

    /// Mark an order delivered or not.
    pub async fn set_delivered(&self, order_id: u64, delivered: bool) -> AppResult<MessageBody> {
        self.set_delivered.mutate_async((order_id, delivered)).await
    }

    /// Attach a tracking number to an order.
    pub async fn add_tracking(&self, order_id: u64, tracking_number: &str) -> AppResult<MessageBody> {
        let tracking_number = tracking_number.trim();
        if tracking_number.is_empty() {
            let err = AppError::validation("Tracking number is required");
            self.ctx.notifier.error(&err.message);
            return Err(err);
        }
        self.add_tracking
            .mutate_async(AddTrackingRequest {
                order_id,
                tracking_number: tracking_number.to_string(),
            })
            .await
    }
}

fn fulfilment<I>(ctx: &ServiceContext, mutation: Mutation<I, MessageBody>) -> Mutation<I, MessageBody>
where
    I: Clone + Send + Sync + 'static,
{
    let cache = ctx.cache.clone();
    let ok = Arc::clone(&ctx.notifier);
    let failed = Arc::clone(&ctx.notifier);
    mutation
        .on_success(move |_, _| {
            cache.invalidate(&keys::admin_orders());
            ok.success("Order status updated");
        })
        .on_error(move |_: &ErrorInfo, _| failed.error("Failed to update order status"))
}
