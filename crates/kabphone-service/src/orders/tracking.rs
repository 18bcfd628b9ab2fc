//! Looking up one order by tracking number.

use kabphone_cache::{Fetcher, QueryEntry, QueryObserver, QueryOptions, keys, query_fn};
use kabphone_client::OrderApi;
use kabphone_core::error::AppError;
use kabphone_core::result::AppResult;
use kabphone_entity::order::Order;

use crate::context::{ServiceContext, display_message};

/// The tracking search box. The query stays disabled until a number is
/// entered.
#[derive(Debug)]
pub struct OrderTracking {
    ctx: ServiceContext,
    orders: OrderApi,
    number: String,
    observer: QueryObserver,
}

impl OrderTracking {
    /// Mount with an empty search box.
    pub fn new(ctx: ServiceContext, orders: OrderApi) -> Self {
        let observer = ctx.cache.observe(
            keys::track_order(""),
            track_fetcher(&orders, ""),
            QueryOptions::disabled(),
        );
        Self {
            ctx,
            orders,
            number: String::new(),
            observer,
        }
    }

    /// The last searched tracking number.
    pub fn tracking_number(&self) -> &str {
        &self.number
    }

    /// The lookup entry.
    pub fn entry(&self) -> QueryEntry {
        self.observer.entry()
    }

    /// Look up `tracking_number` and wait for the answer, toasting the
    /// outcome.
    pub async fn search(&mut self, tracking_number: &str) -> AppResult<Order> {
        let number = tracking_number.trim();
        if number.is_empty() {
            return Err(AppError::validation("Tracking number is required"));
        }

        self.number = number.to_string();
        self.observer.set_key_with(
            keys::track_order(number),
            track_fetcher(&self.orders, number),
            QueryOptions::default(),
        );
        self.observer.refetch();

        let result = self.observer.settled().await.result::<Order>();
        match &result {
            Ok(_) => self.ctx.notifier.success("Order found"),
            Err(err) if err.is_unauthorized() => {}
            Err(err) => self
                .ctx
                .notifier
                .error(&display_message(&err.info(), "Failed to find order")),
        }
        result
    }
}

fn track_fetcher(orders: &OrderApi, tracking_number: &str) -> Fetcher {
    let orders = orders.clone();
    let number = tracking_number.to_string();
    query_fn(move || {
        let orders = orders.clone();
        let number = number.clone();
        async move { orders.track(&number).await }
    })
}
