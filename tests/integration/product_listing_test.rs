//! Integration tests for the product listing: search, paging and retries.

mod helpers;

use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use kabphone_cache::keys;
use kabphone_core::types::PageEnvelope;
use kabphone_entity::catalog::Phone;

async fn search_terms(t: &helpers::TestApp) -> Vec<Option<String>> {
    t.server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/api/phones")
        .map(|r| {
            r.url
                .query_pairs()
                .find(|(name, _)| name == "search")
                .map(|(_, value)| value.into_owned())
        })
        .collect()
}

#[tokio::test]
async fn test_keystrokes_collapse_into_one_search() {
    let t = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/api/phones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::phone_page(1, 4)))
        .mount(&t.server)
        .await;

    let listing = t.app.product_listing();
    listing.settled().await;
    listing.go_to_page(1);
    listing.settled().await;

    for input in ["i", "ip", "iph", "ipho", "iphon", "iphone"] {
        listing.type_search(input);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(listing.search(), "");

    tokio::time::sleep(Duration::from_millis(200)).await;
    let entry = listing.settled().await;

    assert_eq!(entry.key, keys::phones(0, "iphone"));
    assert_eq!(listing.page(), 0);
    assert_eq!(listing.search(), "iphone");
    assert_eq!(
        search_terms(&t).await,
        vec![None, None, Some("iphone".to_string())]
    );
}

#[tokio::test]
async fn test_submitted_search_skips_debounce() {
    let t = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/api/phones"))
        .and(query_param("search", "galaxy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::phone_page(20, 2)))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/phones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::phone_page(1, 8)))
        .mount(&t.server)
        .await;

    let listing = t.app.product_listing();
    listing.type_search("gal");
    listing.search_now("  galaxy ");
    let entry = listing.settled().await;

    assert_eq!(entry.key, keys::phones(0, "galaxy"));
    let page = entry.result::<PageEnvelope<Phone>>().unwrap();
    assert_eq!(page.data.len(), 2);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(listing.search(), "galaxy");
}

#[tokio::test]
async fn test_paging_stops_at_short_page() {
    let t = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/api/phones"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::phone_page(9, 3)))
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/phones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::phone_page(1, 8)))
        .mount(&t.server)
        .await;

    let listing = t.app.product_listing();
    listing.settled().await;
    assert!(!listing.prev_page());

    assert!(listing.next_page());
    listing.settled().await;
    assert_eq!(listing.page(), 1);
    assert_eq!(listing.listing().unwrap().unwrap().data.len(), 3);

    assert!(!listing.next_page());
    assert_eq!(listing.page(), 1);

    assert!(listing.prev_page());
    assert_eq!(listing.page(), 0);
    assert!(listing.entry().is_success());
    assert_eq!(t.hits("GET", "/api/phones").await, 2);
}

#[tokio::test]
async fn test_empty_catalog_is_an_empty_page() {
    let t = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/api/phones"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "no phones", "data": null})),
        )
        .mount(&t.server)
        .await;

    let listing = t.app.product_listing();
    listing.settled().await;

    assert!(listing.listing().unwrap().unwrap().data.is_empty());
    assert!(!listing.next_page());
}

#[tokio::test]
async fn test_failed_page_is_kept_until_retry() {
    let t = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/api/phones"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/phones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::phone_page(1, 5)))
        .mount(&t.server)
        .await;

    let listing = t.app.product_listing();
    let entry = listing.settled().await;
    assert!(entry.is_error());
    assert_eq!(entry.error.unwrap().status, Some(503));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(listing.entry().is_error());
    assert_eq!(t.hits("GET", "/api/phones").await, 1);

    listing.refetch();
    let entry = listing.settled().await;
    assert!(entry.is_success());
    assert_eq!(listing.listing().unwrap().unwrap().data.len(), 5);
}

#[tokio::test]
async fn test_image_url_points_at_backend() {
    let t = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/api/phones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::phone_page(1, 1)))
        .mount(&t.server)
        .await;

    let listing = t.app.product_listing();
    assert_eq!(
        listing.image_url(12),
        format!("{}/api/phones/images/12", t.server.uri())
    );
}
