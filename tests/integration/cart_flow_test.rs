//! Integration tests for the cart view and checkout.

mod helpers;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, path_regex};
use wiremock::{Mock, ResponseTemplate};

use kabphone_cache::keys;

async fn mount_cart_sequence(t: &helpers::TestApp, first: serde_json::Value, then: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/carts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first))
        .up_to_n_times(1)
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/carts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(then))
        .mount(&t.server)
        .await;
}

#[tokio::test]
async fn test_quantity_zero_removes_item_and_reloads_cart() {
    let t = helpers::TestApp::new().await;
    t.login_as("customer");
    mount_cart_sequence(
        &t,
        helpers::cart(&[(1, 2, 9_990.0), (2, 1, 1_000.0)]),
        helpers::cart(&[(2, 1, 1_000.0)]),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path("/api/carts/items/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::message("Item removed")))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path_regex(r"^/api/carts/items/\d+$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&t.server)
        .await;

    let mut view = t.app.cart();
    assert!(view.settled().await.is_success());
    assert_eq!(view.total(), 20_980.0);

    view.on_update_quantity(1, 0).await.unwrap();
    let entry = view.settled().await;

    assert!(entry.is_success());
    let cart = view.cart().unwrap().unwrap();
    assert_eq!(cart.items.len(), 1);
    assert!(cart.item(1).is_none());
    assert_eq!(view.total(), 1_000.0);
    assert_eq!(t.hits("GET", "/api/carts/").await, 2);
    assert_eq!(t.messages(), vec!["Item removed".to_string()]);
}

#[tokio::test]
async fn test_increment_and_decrement_send_new_amount() {
    let t = helpers::TestApp::new().await;
    t.login_as("customer");
    Mock::given(method("GET"))
        .and(path("/api/carts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::cart(&[(4, 2, 5_000.0)])))
        .mount(&t.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/carts/items/4"))
        .and(body_json(json!({"amount": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::message("Quantity updated")))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/carts/items/4"))
        .and(body_json(json!({"amount": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::message("Quantity updated")))
        .expect(1)
        .mount(&t.server)
        .await;

    let mut view = t.app.cart();
    view.settled().await;

    view.increment(4).await.unwrap();
    view.settled().await;
    view.decrement(4).await.unwrap();
    view.settled().await;

    let err = view.increment(99).await.unwrap_err();
    assert_eq!(err.kind, kabphone_core::ErrorKind::Validation);
}

#[tokio::test]
async fn test_failed_update_shows_fallback_message() {
    let t = helpers::TestApp::new().await;
    t.login_as("customer");
    Mock::given(method("GET"))
        .and(path("/api/carts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::cart(&[(4, 2, 5_000.0)])))
        .mount(&t.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/carts/items/4"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&t.server)
        .await;

    let mut view = t.app.cart();
    view.settled().await;

    let err = view.on_update_quantity(4, 5).await.unwrap_err();
    assert_eq!(err.status, Some(500));
    assert_eq!(t.messages(), vec!["Failed to update quantity".to_string()]);
    assert_eq!(t.hits("GET", "/api/carts/").await, 1);
}

#[tokio::test]
async fn test_checkout_confirms_and_opens_tracking() {
    let t = helpers::TestApp::new().await;
    t.login_as("customer");
    mount_cart_sequence(&t, helpers::cart(&[(1, 1, 15_900.0)]), helpers::cart(&[])).await;
    Mock::given(method("POST"))
        .and(path("/api/orders/confirm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::message("Order confirmed")))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/track-orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok", "data": []})))
        .mount(&t.server)
        .await;

    {
        let mut history = t.app.order_history();
        history.settled().await;
    }
    let mut view = t.app.cart();
    view.settled().await;
    t.app.open(&kabphone_auth::Route::Cart);

    view.checkout().await.unwrap();

    assert_eq!(t.app.current_path(), "/track-order");
    assert_eq!(t.messages(), vec!["Order confirmed".to_string()]);
    assert!(view.settled().await.is_success());
    assert_eq!(view.cart().unwrap().unwrap().items.len(), 0);
    assert!(t.app.cache().get(&keys::order_history(0)).is_some_and(|e| e.is_stale));
}

#[tokio::test]
async fn test_add_to_cart_while_logged_out_goes_to_login() {
    let t = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/api/phones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::phone_page(1, 3)))
        .mount(&t.server)
        .await;

    let listing = t.app.product_listing();
    listing.settled().await;

    assert!(!listing.add_to_cart(2).await.unwrap());
    assert_eq!(t.app.current_path(), "/login");
    assert_eq!(t.hits("POST", "/api/carts/items").await, 0);
    assert_eq!(t.hits("GET", "/api/carts/").await, 0);
}

#[tokio::test]
async fn test_add_to_cart_refreshes_badge() {
    let t = helpers::TestApp::new().await;
    t.login_as("customer");
    Mock::given(method("GET"))
        .and(path("/api/phones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::phone_page(1, 3)))
        .mount(&t.server)
        .await;
    mount_cart_sequence(&t, helpers::cart(&[(1, 1, 100.0)]), helpers::cart(&[(1, 1, 100.0), (2, 2, 50.0)]))
        .await;
    Mock::given(method("POST"))
        .and(path("/api/carts/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::message("Added to cart")))
        .expect(1)
        .mount(&t.server)
        .await;

    let listing = t.app.product_listing();
    assert_eq!(listing.cart_count_settled().await, 1);

    assert!(listing.add_to_cart(102).await.unwrap());

    assert_eq!(listing.cart_count_settled().await, 3);
    assert_eq!(t.messages(), vec!["Added to cart".to_string()]);
}
