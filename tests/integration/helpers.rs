//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use wiremock::MockServer;

use kabphone::Storefront;
use kabphone_auth::session::backend::MemorySessionStorage;
use kabphone_core::config::{AppConfig, ApiConfig, QueryConfig, SessionConfig};
use kabphone_core::traits::SessionStorage;
use kabphone_service::RecordingNotifier;

/// A storefront wired to a mock backend.
pub struct TestApp {
    /// Mock backend; routes live under `/api`.
    pub server: MockServer,
    /// The client under test.
    pub app: Storefront,
    /// Collects every toast.
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    /// A storefront with in-memory session storage.
    pub async fn new() -> Self {
        Self::with_storage(Arc::new(MemorySessionStorage::new())).await
    }

    /// A storefront over `storage`, for persistence tests.
    pub async fn with_storage(storage: Arc<dyn SessionStorage>) -> Self {
        let server = MockServer::start().await;
        let notifier = Arc::new(RecordingNotifier::new());
        let app = Storefront::with_storage(test_config(&server), storage, notifier.clone())
            .expect("build storefront");
        Self {
            server,
            app,
            notifier,
        }
    }

    /// Store a session for `role` without calling the backend.
    pub fn login_as(&self, role: &str) {
        self.app
            .session()
            .establish(&token(role))
            .expect("establish session");
    }

    /// Toast messages shown so far.
    pub fn messages(&self) -> Vec<String> {
        self.notifier.messages()
    }

    /// Number of requests the backend saw for `method` and `path`.
    pub async fn hits(&self, method: &str, path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == method && r.url.path() == path)
            .count()
    }
}

/// Configuration pointing at `server` with a short search debounce.
pub fn test_config(server: &MockServer) -> AppConfig {
    AppConfig {
        api: ApiConfig {
            base_url: format!("{}/api", server.uri()),
            ..ApiConfig::default()
        },
        session: SessionConfig {
            backend: "memory".to_string(),
            ..SessionConfig::default()
        },
        query: QueryConfig {
            search_debounce_ms: 50,
            ..QueryConfig::default()
        },
        ..AppConfig::default()
    }
}

/// A backend-shaped token for `role`.
pub fn token(role: &str) -> String {
    encode(
        &Header::default(),
        &json!({
            "id": 7,
            "username": "malee",
            "first_name": "Malee",
            "role": role,
            "exp": 4_102_444_800i64,
        }),
        &EncodingKey::from_secret(b"integration-secret"),
    )
    .expect("sign token")
}

/// A phone as the catalog returns it.
pub fn phone(id: u64, brand: &str, model: &str, price: f64) -> Value {
    json!({
        "id": id,
        "price": price,
        "brand_name": brand,
        "model_name": model,
        "os": "iOS",
        "amount": 5,
        "image": format!("phone-{id}.png")
    })
}

/// A page of `count` phones starting at ID `first`.
pub fn phone_page(first: u64, count: u64) -> Value {
    let data: Vec<Value> = (first..first + count)
        .map(|id| phone(id, "Apple", &format!("iPhone {id}"), 20_000.0 + id as f64))
        .collect();
    json!({ "message": "get phones success", "data": data, "total": 11 })
}

/// A cart holding `(item_id, amount, unit_price)` lines.
pub fn cart(items: &[(u64, i64, f64)]) -> Value {
    let items: Vec<Value> = items
        .iter()
        .map(|&(id, amount, price)| {
            json!({
                "id": id,
                "amount": amount,
                "phone_id": id + 100,
                "cart_id": 1,
                "phone": phone(id + 100, "Samsung", "Galaxy", price)
            })
        })
        .collect();
    json!({
        "message": "get cart success",
        "data": { "id": 1, "user_id": 7, "status": "pending", "items": items }
    })
}

/// A confirmed order.
pub fn order(id: u64, tracking_number: &str, delivered: bool) -> Value {
    json!({
        "id": id,
        "tracking_number": tracking_number,
        "cart_id": id,
        "cart": cart(&[(id, 1, 15_900.0)])["data"],
        "total_price": 15_900.0,
        "isDelivered": delivered,
        "created_at": "2026-03-01T10:00:00Z"
    })
}

/// `{"message": ...}`.
pub fn message(text: &str) -> Value {
    json!({ "message": text })
}
