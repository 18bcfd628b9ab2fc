//! Integration tests for the back-office flows.

mod helpers;

use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header_regex, method, path};
use wiremock::{Mock, ResponseTemplate};

use kabphone_auth::guard::{GuardDecision, Route};
use kabphone_cache::keys;
use kabphone_core::ErrorKind;
use kabphone_entity::analytics::{BestWorstPhones, TotalIncome};
use kabphone_entity::catalog::{ImageUpload, PhoneForm};
use kabphone_entity::order::Order;

fn form(image: Option<ImageUpload>) -> PhoneForm {
    PhoneForm {
        brand_name: "Apple".to_string(),
        model_name: "iPhone 15".to_string(),
        os: "iOS".to_string(),
        price: 32_900.0,
        amount: 4,
        image,
    }
}

#[tokio::test]
async fn test_mark_delivered_refreshes_order_list() {
    let t = helpers::TestApp::new().await;
    t.login_as("admin");
    Mock::given(method("GET"))
        .and(path("/api/orders/check-order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "data": [helpers::order(5, "TH555", false), helpers::order(6, "", false)]
        })))
        .up_to_n_times(1)
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/check-order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "data": [helpers::order(5, "TH555", true), helpers::order(6, "", false)]
        })))
        .mount(&t.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/orders/5"))
        .and(body_json(json!({"isDelivered": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::message("updated")))
        .expect(1)
        .mount(&t.server)
        .await;

    assert!(t.app.open(&Route::CheckOrder).is_allowed());
    let mut orders = t.app.admin_orders();
    let before = orders.settled().await.result::<Vec<Order>>().unwrap();
    assert!(!before[0].is_delivered);

    orders.set_delivered(5, true).await.unwrap();
    let after = orders.settled().await.result::<Vec<Order>>().unwrap();

    assert!(after[0].is_delivered);
    assert_eq!(after[0].item_summary(), vec!["1x Samsung Galaxy".to_string()]);
    assert_eq!(t.messages(), vec!["Order status updated".to_string()]);
}

#[tokio::test]
async fn test_add_tracking_number() {
    let t = helpers::TestApp::new().await;
    t.login_as("admin");
    Mock::given(method("GET"))
        .and(path("/api/orders/check-order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok", "data": []})))
        .mount(&t.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders/add-tracking"))
        .and(body_json(json!({"order_id": 6, "tracking_number": "TH666"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::message("tracking added")))
        .expect(1)
        .mount(&t.server)
        .await;

    let orders = t.app.admin_orders();
    let err = orders.add_tracking(6, "   ").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    orders.add_tracking(6, " TH666 ").await.unwrap();
    assert_eq!(
        t.messages(),
        vec!["Tracking number is required".to_string(), "Order status updated".to_string()]
    );
}

#[tokio::test]
async fn test_add_product_uploads_multipart_and_returns_home() {
    let t = helpers::TestApp::new().await;
    t.login_as("admin");
    Mock::given(method("POST"))
        .and(path("/api/phones"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("iPhone 15"))
        .and(body_string_contains("filename=\"front.png\""))
        .and(body_string_contains("PNGDATA"))
        .respond_with(ResponseTemplate::new(201).set_body_json(helpers::message("created")))
        .expect(1)
        .mount(&t.server)
        .await;

    t.app.open(&Route::AddProduct);
    let admin = t.app.product_admin();

    let err = admin.add_product(form(None)).await.unwrap_err();
    assert_eq!(err.message, "image is required");

    let image = ImageUpload::from_file_name("front.png", b"PNGDATA".to_vec());
    admin.add_product(form(Some(image))).await.unwrap();

    assert_eq!(t.app.current_path(), "/");
    assert_eq!(
        t.messages(),
        vec!["image is required".to_string(), "Product added successfully".to_string()]
    );
}

#[tokio::test]
async fn test_edit_and_delete_refresh_listing() {
    let t = helpers::TestApp::new().await;
    t.login_as("admin");
    Mock::given(method("GET"))
        .and(path("/api/phones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::phone_page(1, 3)))
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/carts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::cart(&[])))
        .mount(&t.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/phones/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::message("updated")))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/phones/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::message("Phone deleted")))
        .expect(1)
        .mount(&t.server)
        .await;

    let listing = t.app.product_listing();
    listing.settled().await;
    let admin = t.app.product_admin();

    assert_eq!(t.app.open(&Route::EditProduct(2)), GuardDecision::Allow);
    admin.edit_product(2, form(None)).await.unwrap();
    listing.settled().await;
    admin.delete_product(3).await.unwrap();
    listing.settled().await;

    assert_eq!(t.hits("GET", "/api/phones").await, 3);
    assert!(t.app.cache().get(&keys::phones(0, "")).is_some_and(|e| e.is_success()));
    assert_eq!(
        t.messages(),
        vec!["Product updated successfully".to_string(), "Phone deleted".to_string()]
    );
}

#[tokio::test]
async fn test_income_and_ranking_reports() {
    let t = helpers::TestApp::new().await;
    t.login_as("admin");
    Mock::given(method("GET"))
        .and(path("/api/orders/total-income"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "data": {
                "total_income_day": 1500.0,
                "total_income_week": 9000.0,
                "total_income_month": 42000.0,
                "total_income_year": 510000.0
            }
        })))
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/best-worst-phones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "data": {
                "best_phone_day": {"brand_name": "Apple", "model_name": "iPhone 15"},
                "worst_phone_day": {"brand_name": "", "model_name": ""}
            }
        })))
        .mount(&t.server)
        .await;

    let income = t.app.income_report().settled().await.result::<TotalIncome>().unwrap();
    assert_eq!(income.rows()[2], ("Month", 42000.0));

    let ranking = t.app.sales_ranking().settled().await.result::<BestWorstPhones>().unwrap();
    let (period, best, worst) = ranking.rows()[0];
    assert_eq!(period, "Day");
    assert_eq!(best.label().as_deref(), Some("Apple iPhone 15"));
    assert_eq!(worst.label(), None);
}

#[tokio::test]
async fn test_customer_cannot_reach_back_office() {
    let t = helpers::TestApp::new().await;
    t.login_as("customer");

    for route in [Route::ShowIncome, Route::CheckOrder, Route::AddProduct] {
        assert_eq!(t.app.open(&route), GuardDecision::Redirect(Route::Home));
    }
    assert!(t.app.open(&Route::WorstBestSelling).is_allowed());
}
