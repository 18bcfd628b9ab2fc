//! Sales reports.

use kabphone_cache::{QueryEntry, QueryObserver, QueryOptions, keys, query_fn};
use kabphone_client::OrderApi;
use kabphone_core::result::AppResult;
use kabphone_entity::analytics::{BestWorstPhones, TotalIncome};

use crate::context::ServiceContext;

/// Income totals per day, week, month, and year. Admin only.
#[derive(Debug)]
pub struct IncomeReport {
    observer: QueryObserver,
}

impl IncomeReport {
    /// Mount the report. Must be called from within a Tokio runtime.
    pub fn new(ctx: &ServiceContext, orders: OrderApi) -> Self {
        let observer = ctx.cache.observe(
            keys::total_income(),
            query_fn(move || {
                let orders = orders.clone();
                async move { orders.total_income().await }
            }),
            QueryOptions::default(),
        );
        Self { observer }
    }

    /// The report's entry.
    pub fn entry(&self) -> QueryEntry {
        self.observer.entry()
    }

    /// The totals, once loaded.
    pub fn income(&self) -> AppResult<Option<TotalIncome>> {
        self.observer.data()
    }

    /// Wait until the report has no fetch in flight.
    pub async fn settled(&mut self) -> QueryEntry {
        self.observer.settled().await
    }

    /// Retry.
    pub fn refetch(&self) {
        self.observer.refetch();
    }
}

/// Best and worst selling phone per period.
#[derive(Debug)]
pub struct SalesRanking {
    observer: QueryObserver,
}

impl SalesRanking {
    /// Mount the ranking. Must be called from within a Tokio runtime.
    pub fn new(ctx: &ServiceContext, orders: OrderApi) -> Self {
        let observer = ctx.cache.observe(
            keys::worst_best_selling(),
            query_fn(move || {
                let orders = orders.clone();
                async move { orders.best_worst().await }
            }),
            QueryOptions::default(),
        );
        Self { observer }
    }

    /// The ranking's entry.
    pub fn entry(&self) -> QueryEntry {
        self.observer.entry()
    }

    /// The ranking, once loaded.
    pub fn ranking(&self) -> AppResult<Option<BestWorstPhones>> {
        self.observer.data()
    }

    /// Wait until the ranking has no fetch in flight.
    pub async fn settled(&mut self) -> QueryEntry {
        self.observer.settled().await
    }

    /// Retry.
    pub fn refetch(&self) {
        self.observer.refetch();
    }
}
