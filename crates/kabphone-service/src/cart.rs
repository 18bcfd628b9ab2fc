//! The cart view.

use std::sync::Arc;

use tracing::debug;

use kabphone_auth::guard::Route;
use kabphone_cache::{Mutation, QueryEntry, QueryObserver, QueryOptions, keys, query_fn};
use kabphone_client::{CartApi, OrderApi};
use kabphone_core::error::{AppError, ErrorInfo};
use kabphone_core::result::AppResult;
use kabphone_core::types::MessageBody;
use kabphone_entity::cart::Cart;

use crate::context::{ServiceContext, display_message};

/// Shows the cart and edits quantities until checkout.
#[derive(Debug)]
pub struct CartView {
    ctx: ServiceContext,
    observer: QueryObserver,
    update: Mutation<(u64, i64), MessageBody>,
    remove: Mutation<u64, MessageBody>,
    checkout: Mutation<(), MessageBody>,
}

impl CartView {
    /// Mount the view. Must be called from within a Tokio runtime.
    pub fn new(ctx: ServiceContext, carts: CartApi, orders: OrderApi) -> Self {
        let observer = {
            let carts = carts.clone();
            ctx.cache.observe(
                keys::cart(),
                query_fn(move || {
                    let carts = carts.clone();
                    async move { carts.get().await }
                }),
                QueryOptions::default(),
            )
        };

        let cart_keys = || vec![keys::cart(), keys::cart_item_count()];
        let update = {
            let carts = carts.clone();
            Mutation::new(move |(item_id, amount): (u64, i64)| {
                let carts = carts.clone();
                async move { carts.update_item(item_id, amount).await }
            })
        };
        let remove = Mutation::new(move |item_id: u64| {
            let carts = carts.clone();
            async move { carts.remove_item(item_id).await }
        });
        let checkout = Mutation::new(move |()| {
            let orders = orders.clone();
            async move { orders.confirm().await }
        });

        let checkout = {
            let cache = ctx.cache.clone();
            let navigator = Arc::clone(&ctx.navigator);
            let ok = Arc::clone(&ctx.notifier);
            let failed = Arc::clone(&ctx.notifier);
            checkout
                .on_success(move |body: &MessageBody, _| {
                    cache.invalidate(&keys::cart());
                    cache.invalidate(&keys::cart_item_count());
                    cache.invalidate(&keys::order_history_prefix());
                    ok.success(&body.message);
                    navigator.push(&Route::TrackOrder.path());
                })
                .on_error(move |error: &ErrorInfo, _| {
                    failed.error(&display_message(error, "Failed to confirm order"));
                })
        };

        Self {
            update: ctx.message_mutation(update, cart_keys(), "Failed to update quantity"),
            remove: ctx.message_mutation(remove, cart_keys(), "Failed to remove item"),
            checkout,
            observer,
            ctx,
        }
    }

    /// The cart entry.
    pub fn entry(&self) -> QueryEntry {
        self.observer.entry()
    }

    /// The cart, once loaded.
    pub fn cart(&self) -> AppResult<Option<Cart>> {
        self.observer.data()
    }

    /// Sum of amount × price over every item.
    pub fn total(&self) -> f64 {
        self.cart().ok().flatten().map_or(0.0, |cart| cart.total_price())
    }

    /// Wait until the cart has no fetch in flight.
    pub async fn settled(&mut self) -> QueryEntry {
        self.observer.settled().await
    }

    /// Retry loading the cart.
    pub fn refetch(&self) {
        self.observer.refetch();
    }

    /// Set an item's quantity. Zero or less removes the item instead of
    /// updating it to zero.
    pub async fn on_update_quantity(&self, item_id: u64, quantity: i64) -> AppResult<MessageBody> {
        if quantity <= 0 {
            debug!(item_id, "Quantity dropped to zero, removing item");
            return self.remove.mutate_async(item_id).await;
        }
        self.update.mutate_async((item_id, quantity)).await
    }

    /// One more of `item_id`.
    pub async fn increment(&self, item_id: u64) -> AppResult<MessageBody> {
        let amount = self.amount_of(item_id)?;
        self.on_update_quantity(item_id, amount + 1).await
    }

    /// One fewer of `item_id`.
    pub async fn decrement(&self, item_id: u64) -> AppResult<MessageBody> {
        let amount = self.amount_of(item_id)?;
        self.on_update_quantity(item_id, amount - 1).await
    }

    /// Take `item_id` out of the cart.
    pub async fn remove_item(&self, item_id: u64) -> AppResult<MessageBody> {
        self.remove.mutate_async(item_id).await
    }

    /// Turn the cart into an order and go to order tracking.
    pub async fn checkout(&self) -> AppResult<MessageBody> {
        self.checkout.mutate_async(()).await
    }

    fn amount_of(&self, item_id: u64) -> AppResult<i64> {
        self.cart()?
            .as_ref()
            .and_then(|cart| cart.item(item_id))
            .map(|item| item.amount)
            .ok_or_else(|| AppError::validation(format!("Item {item_id} is not in the cart")))
    }
}
