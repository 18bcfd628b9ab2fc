//! Composition root.

use std::sync::Arc;

use tracing::info;

use kabphone_auth::guard::{GuardDecision, HistoryNavigator, Route, RouteGuard};
use kabphone_auth::session::backend;
use kabphone_auth::SessionStore;
use kabphone_cache::QueryCache;
use kabphone_client::{CartApi, ForceLogout, Gateway, OrderApi, PhoneApi, UserApi};
use kabphone_core::config::AppConfig;
use kabphone_core::result::AppResult;
use kabphone_core::traits::{Navigator, SessionStorage};
use kabphone_service::{
    AdminOrders, AuthService, CartView, IncomeReport, Notifier, OrderHistory, OrderTracking,
    ProductAdmin, ProductListing, ProfileView, SalesRanking, ServiceContext,
};

/// Every long-lived component of the client, built once and shared.
#[derive(Debug, Clone)]
pub struct Storefront {
    config: AppConfig,
    session: Arc<SessionStore>,
    navigator: Arc<HistoryNavigator>,
    cache: QueryCache,
    gateway: Arc<Gateway>,
    guard: RouteGuard,
    ctx: ServiceContext,
}

impl Storefront {
    /// Build the client with the session backend named in `config`.
    pub fn new(config: AppConfig, notifier: Arc<dyn Notifier>) -> AppResult<Self> {
        let storage = backend::from_config(&config.session)?;
        Self::with_storage(config, storage, notifier)
    }

    /// Build the client over an explicit session storage.
    pub fn with_storage(
        config: AppConfig,
        storage: Arc<dyn SessionStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> AppResult<Self> {
        let session = Arc::new(SessionStore::new(storage));
        let navigator = Arc::new(HistoryNavigator::new());
        let cache = QueryCache::from_config(&config.query);

        let policy = ForceLogout::new(session.clone(), navigator.clone())
            .with_scoped(Arc::new(cache.clone()));
        let gateway = Arc::new(Gateway::new(&config.api, session.clone(), Arc::new(policy))?);
        let guard = RouteGuard::new(session.clone(), navigator.clone());
        let ctx = ServiceContext::new(
            session.clone(),
            cache.clone(),
            navigator.clone(),
            notifier,
            config.query.clone(),
        );

        info!(
            base_url = %gateway.base_url(),
            authenticated = session.snapshot().is_authenticated(),
            "Storefront ready"
        );

        Ok(Self {
            config,
            session,
            navigator,
            cache,
            gateway,
            guard,
            ctx,
        })
    }

    /// Loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The session store.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Navigation history.
    pub fn navigator(&self) -> &Arc<HistoryNavigator> {
        &self.navigator
    }

    /// The path currently shown.
    pub fn current_path(&self) -> String {
        self.navigator.current()
    }

    /// The shared query cache.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// The HTTP gateway.
    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    /// The route guard.
    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// Collaborators handed to services.
    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    /// Navigate to `route` through the guard.
    pub fn open(&self, route: &Route) -> GuardDecision {
        self.guard.navigate(route)
    }

    /// `/users` endpoints.
    pub fn users(&self) -> UserApi {
        UserApi::new(self.gateway.clone())
    }

    /// `/phones` endpoints.
    pub fn phones(&self) -> PhoneApi {
        PhoneApi::new(self.gateway.clone())
    }

    /// `/carts` endpoints.
    pub fn carts(&self) -> CartApi {
        CartApi::new(self.gateway.clone())
    }

    /// `/orders` endpoints.
    pub fn orders(&self) -> OrderApi {
        OrderApi::new(self.gateway.clone())
    }

    /// Login, registration, and logout.
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.ctx.clone(), self.users())
    }

    /// Mount the product grid.
    pub fn product_listing(&self) -> ProductListing {
        ProductListing::new(self.ctx.clone(), self.phones(), self.carts())
    }

    /// The admin product form.
    pub fn product_admin(&self) -> ProductAdmin {
        ProductAdmin::new(self.ctx.clone(), self.phones())
    }

    /// Mount the cart.
    pub fn cart(&self) -> CartView {
        CartView::new(self.ctx.clone(), self.carts(), self.orders())
    }

    /// Mount the order history.
    pub fn order_history(&self) -> OrderHistory {
        OrderHistory::new(&self.ctx, self.orders())
    }

    /// Mount the tracking lookup.
    pub fn order_tracking(&self) -> OrderTracking {
        OrderTracking::new(self.ctx.clone(), self.orders())
    }

    /// Mount the admin order board.
    pub fn admin_orders(&self) -> AdminOrders {
        AdminOrders::new(self.ctx.clone(), self.orders())
    }

    /// Mount the income report.
    pub fn income_report(&self) -> IncomeReport {
        IncomeReport::new(&self.ctx, self.orders())
    }

    /// Mount the best/worst sellers report.
    pub fn sales_ranking(&self) -> SalesRanking {
        SalesRanking::new(&self.ctx, self.orders())
    }

    /// Mount the profile view.
    pub fn profile(&self) -> ProfileView {
        ProfileView::new(self.ctx.clone(), self.users())
    }
}
