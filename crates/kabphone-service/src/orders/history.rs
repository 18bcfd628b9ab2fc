//! The signed-in user's orders, four per page.

use kabphone_cache::{Fetcher, QueryEntry, QueryObserver, QueryOptions, keys, query_fn};
use kabphone_client::OrderApi;
use kabphone_core::result::AppResult;
use kabphone_core::types::PageQuery;
use kabphone_entity::order::Order;

use crate::context::ServiceContext;

/// Paginated order history.
#[derive(Debug)]
pub struct OrderHistory {
    orders: OrderApi,
    page: u32,
    page_size: u32,
    observer: QueryObserver,
}

impl OrderHistory {
    /// Mount on page 0. Must be called from within a Tokio runtime.
    pub fn new(ctx: &ServiceContext, orders: OrderApi) -> Self {
        let page_size = ctx.query.order_page_size;
        let observer = ctx.cache.observe(
            keys::order_history(0),
            history_fetcher(&orders, 0, page_size),
            QueryOptions::default(),
        );
        Self {
            orders,
            page: 0,
            page_size,
            observer,
        }
    }

    /// Current page index.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The current page's entry.
    pub fn entry(&self) -> QueryEntry {
        self.observer.entry()
    }

    /// Orders on the current page, once loaded.
    pub fn orders(&self) -> AppResult<Option<Vec<Order>>> {
        self.observer.data()
    }

    /// Go to `page`.
    pub fn go_to_page(&mut self, page: u32) {
        self.page = page;
        self.observer.set_key(
            keys::order_history(page),
            history_fetcher(&self.orders, page, self.page_size),
        );
    }

    /// Advance while the current page is full.
    pub fn next_page(&mut self) -> bool {
        let returned = self.orders().ok().flatten().map_or(0, |orders| orders.len());
        if !PageQuery::new(self.page, self.page_size).is_full(returned) {
            return false;
        }
        self.go_to_page(self.page + 1);
        true
    }

    /// Go back, stopping at page 0.
    pub fn prev_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.go_to_page(self.page - 1);
        true
    }

    /// Retry the current page.
    pub fn refetch(&self) {
        self.observer.refetch();
    }

    /// Wait until the current page has no fetch in flight.
    pub async fn settled(&mut self) -> QueryEntry {
        self.observer.settled().await
    }
}

fn history_fetcher(orders: &OrderApi, page: u32, page_size: u32) -> Fetcher {
    let orders = orders.clone();
    query_fn(move || {
        let orders = orders.clone();
        async move { orders.history(&PageQuery::new(page, page_size)).await }
    })
}
