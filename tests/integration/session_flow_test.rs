//! Integration tests for login, logout, forced logout and session persistence.

mod helpers;

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use kabphone_auth::session::backend::FileSessionStorage;
use kabphone_cache::keys;
use kabphone_core::ErrorKind;
use kabphone_core::traits::Navigator;
use kabphone_entity::user::{LoginRequest, UserRole};

fn credentials() -> LoginRequest {
    LoginRequest {
        username: "malee".to_string(),
        password: "Secret123!".to_string(),
    }
}

#[tokio::test]
async fn test_login_stores_session_and_sends_bearer_token() {
    let t = helpers::TestApp::new().await;
    let token = helpers::token("customer");

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .and(body_json(json!({"username": "malee", "password": "Secret123!"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": token})))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/carts/"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::cart(&[(1, 2, 9_990.0)])))
        .expect(1)
        .mount(&t.server)
        .await;

    t.app.navigator().push("/login");
    let claims = t.app.auth().login(&credentials()).await.unwrap();

    assert_eq!(claims.role, Some(UserRole::Customer));
    assert_eq!(t.app.session().get_token().as_deref(), Some(token.as_str()));
    assert!(t.app.session().snapshot().is_authenticated());
    assert_eq!(t.app.current_path(), "/");

    let cart = t.app.carts().get().await.unwrap();
    assert_eq!(cart.item_count(), 2);
}

#[tokio::test]
async fn test_wrong_password_shows_server_message() {
    let t = helpers::TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(helpers::message("invalid username or password")),
        )
        .mount(&t.server)
        .await;

    let err = t.app.auth().login(&credentials()).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!t.app.session().snapshot().is_authenticated());
    assert_eq!(t.messages(), vec!["invalid username or password".to_string()]);
}

#[tokio::test]
async fn test_malformed_login_token_is_rejected() {
    let t = helpers::TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "not-a-jwt"})))
        .mount(&t.server)
        .await;

    let err = t.app.auth().login(&credentials()).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::MalformedToken);
    assert!(t.app.session().get_token().is_none());
    assert_eq!(t.messages(), vec!["Login failed: Invalid token format".to_string()]);
}

#[tokio::test]
async fn test_rejected_token_forces_logout() {
    let t = helpers::TestApp::new().await;
    t.login_as("customer");

    Mock::given(method("GET"))
        .and(path("/api/orders/track-orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "data": [helpers::order(1, "TH123", false)]
        })))
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/carts/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(helpers::message("token expired")))
        .mount(&t.server)
        .await;

    {
        let mut history = t.app.order_history();
        assert!(history.settled().await.is_success());
    }
    assert!(t.app.cache().get(&keys::order_history(0)).is_some());

    t.app.navigator().push("/cart");
    let err = t.app.carts().get().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(t.app.session().get_token().is_none());
    assert!(t.app.session().get_claims().is_none());
    assert_eq!(t.app.current_path(), "/login");
    assert!(t.app.cache().get(&keys::order_history(0)).is_none());
}

#[tokio::test]
async fn test_logout_clears_session_even_when_server_fails() {
    let t = helpers::TestApp::new().await;
    t.login_as("admin");
    Mock::given(method("POST"))
        .and(path("/api/users/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&t.server)
        .await;

    t.app.navigator().push("/show-income");
    t.app.auth().logout().await;

    assert!(!t.app.session().snapshot().is_authenticated());
    assert_eq!(t.app.current_path(), "/");
    assert_eq!(t.messages(), vec!["Logged out successfully".to_string()]);
}

#[tokio::test]
async fn test_session_survives_restart_with_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");

    let first = helpers::TestApp::with_storage(Arc::new(FileSessionStorage::open(&file).unwrap())).await;
    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": helpers::token("admin")})),
        )
        .mount(&first.server)
        .await;
    first.app.auth().login(&credentials()).await.unwrap();
    drop(first);

    let second = helpers::TestApp::with_storage(Arc::new(FileSessionStorage::open(&file).unwrap())).await;
    let session = second.app.session().snapshot();
    assert!(session.is_authenticated());
    assert!(session.is_admin());
    assert_eq!(
        second.app.session().get_claims().and_then(|c| c.username).as_deref(),
        Some("malee")
    );

    second.app.session().clear_session();
    let third = helpers::TestApp::with_storage(Arc::new(FileSessionStorage::open(&file).unwrap())).await;
    assert!(!third.app.session().snapshot().is_authenticated());
}
