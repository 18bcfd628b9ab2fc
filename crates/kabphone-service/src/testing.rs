//! Shared wiring for service tests against a mock backend.

use std::sync::Arc;

use jsonwebtoken::{EncodingKey, Header, encode};
use kabphone_auth::{HistoryNavigator, SessionStore};
use kabphone_cache::QueryCache;
use kabphone_client::{CartApi, ForceLogout, Gateway, OrderApi, PhoneApi, UserApi};
use kabphone_core::config::{ApiConfig, QueryConfig};
use wiremock::MockServer;

use crate::context::ServiceContext;
use crate::notify::RecordingNotifier;

pub(crate) struct Harness {
    pub ctx: ServiceContext,
    pub gateway: Arc<Gateway>,
    pub session: Arc<SessionStore>,
    pub navigator: Arc<HistoryNavigator>,
    pub notifier: Arc<RecordingNotifier>,
    pub cache: QueryCache,
}

impl Harness {
    pub fn new(server: &MockServer) -> Self {
        let session = Arc::new(SessionStore::in_memory());
        let navigator = Arc::new(HistoryNavigator::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let cache = QueryCache::default();
        let policy = ForceLogout::new(session.clone(), navigator.clone())
            .with_scoped(Arc::new(cache.clone()));
        let config = ApiConfig {
            base_url: format!("{}/api", server.uri()),
            ..ApiConfig::default()
        };
        let gateway = Arc::new(
            Gateway::new(&config, session.clone(), Arc::new(policy)).expect("gateway"),
        );
        let query = QueryConfig {
            search_debounce_ms: 50,
            ..QueryConfig::default()
        };
        let ctx = ServiceContext::new(
            session.clone(),
            cache.clone(),
            navigator.clone(),
            notifier.clone(),
            query,
        );
        Self {
            ctx,
            gateway,
            session,
            navigator,
            notifier,
            cache,
        }
    }

    pub fn login_as(&self, role: &str) {
        self.session.establish(&token(role)).expect("establish session");
    }

    pub fn users(&self) -> UserApi {
        UserApi::new(self.gateway.clone())
    }

    pub fn phones(&self) -> PhoneApi {
        PhoneApi::new(self.gateway.clone())
    }

    pub fn carts(&self) -> CartApi {
        CartApi::new(self.gateway.clone())
    }

    pub fn orders(&self) -> OrderApi {
        OrderApi::new(self.gateway.clone())
    }
}

pub(crate) fn token(role: &str) -> String {
    encode(
        &Header::default(),
        &serde_json::json!({"id": 3, "username": "somchai01", "role": role}),
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .expect("sign token")
}

pub(crate) fn phone_json(id: u64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "price": 1000 * id,
        "brand_name": "Brand",
        "model_name": format!("Model {id}"),
        "os": "Android",
        "amount": 10
    })
}

pub(crate) fn cart_json(items: &[(u64, i64, f64)]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = items
        .iter()
        .map(|(id, amount, price)| {
            serde_json::json!({
                "id": id,
                "amount": amount,
                "phone_id": id + 100,
                "cart_id": 1,
                "phone": {
                    "id": id + 100,
                    "price": price,
                    "brand_name": "Brand",
                    "model_name": "Model",
                    "os": "Android",
                    "amount": 10
                }
            })
        })
        .collect();
    serde_json::json!({
        "message": "get cart success",
        "data": {"id": 1, "user_id": 3, "status": "pending", "items": items}
    })
}
