//! The storefront's home view: a paginated, searchable phone grid plus
//! the header's cart badge.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use kabphone_auth::guard::Route;
use kabphone_cache::{
    Debouncer, Fetcher, Mutation, QueryEntry, QueryObserver, QueryOptions, keys, query_fn,
};
use kabphone_client::{CartApi, PhoneApi};
use kabphone_core::result::AppResult;
use kabphone_core::types::{MessageBody, PageEnvelope, PageQuery};
use kabphone_entity::catalog::Phone;

use crate::context::ServiceContext;

struct Grid {
    page: u32,
    search: String,
    observer: QueryObserver,
}

/// Page index and search term are part of the query key, so each
/// combination is its own cache slot. Typed search input only becomes part
/// of the key after the configured quiet period.
pub struct ProductListing {
    ctx: ServiceContext,
    phones: PhoneApi,
    page_size: u32,
    grid: Arc<Mutex<Grid>>,
    search_input: Debouncer<String>,
    cart_count: Mutex<QueryObserver>,
    carts: CartApi,
    add_item: Mutation<u64, MessageBody>,
}

impl std::fmt::Debug for ProductListing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let grid = lock(&self.grid);
        f.debug_struct("ProductListing")
            .field("page", &grid.page)
            .field("search", &grid.search)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl ProductListing {
    /// Mount the view on page 0 with an empty search. Must be called from
    /// within a Tokio runtime.
    pub fn new(ctx: ServiceContext, phones: PhoneApi, carts: CartApi) -> Self {
        let page_size = ctx.query.product_page_size;
        let observer = ctx.cache.observe(
            keys::phones(0, ""),
            phones_fetcher(&phones, 0, "", page_size),
            QueryOptions::default(),
        );
        let grid = Arc::new(Mutex::new(Grid {
            page: 0,
            search: String::new(),
            observer,
        }));

        let search_input = {
            let grid = Arc::clone(&grid);
            let phones = phones.clone();
            Debouncer::new(ctx.query.search_debounce(), move |term: String| {
                let mut grid = lock(&grid);
                let term = term.trim().to_string();
                if term == grid.search {
                    return;
                }
                debug!(search = %term, "Search term settled");
                grid.search = term;
                grid.page = 0;
                show(&mut grid, &phones, page_size);
            })
        };

        let cart_count = ctx.cache.observe(
            keys::cart_item_count(),
            cart_count_fetcher(&carts),
            QueryOptions::enabled_if(ctx.is_authenticated()),
        );

        let add_item = {
            let carts = carts.clone();
            let mutation = Mutation::new(move |phone_id: u64| {
                let carts = carts.clone();
                async move { carts.add_item(phone_id, 1).await }
            });
            ctx.message_mutation(
                mutation,
                vec![keys::cart(), keys::cart_item_count()],
                "Failed to add item to cart",
            )
        };

        Self {
            ctx,
            phones,
            page_size,
            grid,
            search_input,
            cart_count: Mutex::new(cart_count),
            carts,
            add_item,
        }
    }

    /// Current page index.
    pub fn page(&self) -> u32 {
        lock(&self.grid).page
    }

    /// The search term that is part of the current key.
    pub fn search(&self) -> String {
        lock(&self.grid).search.clone()
    }

    /// The entry for the current page and search term.
    pub fn entry(&self) -> QueryEntry {
        lock(&self.grid).observer.entry()
    }

    /// The phones on the current page, once loaded.
    pub fn listing(&self) -> AppResult<Option<PageEnvelope<Phone>>> {
        lock(&self.grid).observer.data()
    }

    /// Record a keystroke in the search box.
    pub fn type_search(&self, input: &str) {
        self.search_input.call(input.to_string());
    }

    /// Apply pending search input now instead of waiting for the delay.
    pub fn flush_search(&self) {
        self.search_input.flush();
    }

    /// Apply a search term immediately, as when submitting a search form.
    pub fn search_now(&self, term: &str) {
        self.search_input.cancel();
        let mut grid = lock(&self.grid);
        grid.search = term.trim().to_string();
        grid.page = 0;
        show(&mut grid, &self.phones, self.page_size);
    }

    /// Go to `page` directly.
    pub fn go_to_page(&self, page: u32) {
        let mut grid = lock(&self.grid);
        grid.page = page;
        show(&mut grid, &self.phones, self.page_size);
    }

    /// Advance one page. Only possible while the current page is full.
    pub fn next_page(&self) -> bool {
        let mut grid = lock(&self.grid);
        let returned = grid
            .observer
            .data::<PageEnvelope<Phone>>()
            .ok()
            .flatten()
            .map_or(0, |page| page.data.len());
        if !PageQuery::new(grid.page, self.page_size).is_full(returned) {
            return false;
        }
        grid.page += 1;
        show(&mut grid, &self.phones, self.page_size);
        true
    }

    /// Go back one page. Page 0 is the floor.
    pub fn prev_page(&self) -> bool {
        let mut grid = lock(&self.grid);
        if grid.page == 0 {
            return false;
        }
        grid.page -= 1;
        show(&mut grid, &self.phones, self.page_size);
        true
    }

    /// Retry the current page.
    pub fn refetch(&self) {
        lock(&self.grid).observer.refetch();
    }

    /// Wait until the current page has no fetch in flight.
    ///
    /// If the page or search term changes while waiting, waits on the new
    /// key instead.
    pub async fn settled(&self) -> QueryEntry {
        loop {
            let (key, mut rx) = {
                let grid = lock(&self.grid);
                (grid.observer.key().clone(), grid.observer.watch())
            };
            let settled = rx
                .wait_for(|entry| !entry.is_fetching)
                .await
                .map(|entry| entry.clone());
            let entry = settled.unwrap_or_else(|_| rx.borrow().clone());
            if lock(&self.grid).observer.key() == &key {
                return entry;
            }
        }
    }

    /// Items in the cart for the header badge. Zero when logged out or when
    /// the count could not be loaded.
    pub fn cart_item_count(&self) -> i64 {
        lock(&self.cart_count)
            .data::<i64>()
            .ok()
            .flatten()
            .unwrap_or(0)
    }

    /// Wait until the badge count has no fetch in flight.
    pub async fn cart_count_settled(&self) -> i64 {
        let mut rx = lock(&self.cart_count).watch();
        let _ = rx.wait_for(|entry| !entry.is_fetching).await;
        self.cart_item_count()
    }

    /// Re-read the session, enabling or disabling the badge count.
    pub fn refresh_session(&self) {
        lock(&self.cart_count).set_key_with(
            keys::cart_item_count(),
            cart_count_fetcher(&self.carts),
            QueryOptions::enabled_if(self.ctx.is_authenticated()),
        );
    }

    /// Put one unit of `phone_id` in the cart.
    ///
    /// Logged-out users are sent to the login view instead and `Ok(false)`
    /// is returned without calling the server.
    pub async fn add_to_cart(&self, phone_id: u64) -> AppResult<bool> {
        if !self.ctx.is_authenticated() {
            info!(phone_id, "Add to cart while logged out, redirecting to login");
            self.ctx.navigator.push(&Route::Login.path());
            return Ok(false);
        }
        self.add_item.mutate_async(phone_id).await?;
        Ok(true)
    }

    /// Where a phone's image is served.
    pub fn image_url(&self, phone_id: u64) -> String {
        self.phones.image_url(phone_id)
    }
}

fn show(grid: &mut Grid, phones: &PhoneApi, page_size: u32) {
    let key = keys::phones(grid.page, &grid.search);
    let fetcher = phones_fetcher(phones, grid.page, &grid.search, page_size);
    grid.observer.set_key(key, fetcher);
}

fn phones_fetcher(phones: &PhoneApi, page: u32, search: &str, page_size: u32) -> Fetcher {
    let phones = phones.clone();
    let query = PageQuery::new(page, page_size).with_search(search);
    query_fn(move || {
        let phones = phones.clone();
        let query = query.clone();
        async move { phones.list(&query).await }
    })
}

fn cart_count_fetcher(carts: &CartApi) -> Fetcher {
    let carts = carts.clone();
    query_fn(move || {
        let carts = carts.clone();
        async move { Ok(carts.get().await?.item_count()) }
    })
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
