//! Integration tests for guarded navigation.

mod helpers;

use kabphone_auth::guard::{GuardDecision, Route};
use kabphone_core::ErrorKind;

#[tokio::test]
async fn test_anonymous_cart_redirects_to_login() {
    let t = helpers::TestApp::new().await;

    let decision = t.app.open(&Route::Cart);

    assert_eq!(decision, GuardDecision::Redirect(Route::Login));
    assert_eq!(t.app.current_path(), "/login");
    assert!(!t.app.navigator().entries().contains(&"/cart".to_string()));
}

#[tokio::test]
async fn test_customer_is_sent_home_from_admin_views() {
    let t = helpers::TestApp::new().await;
    t.login_as("customer");
    t.app.open(&Route::Cart);

    for route in [
        Route::ShowIncome,
        Route::AddProduct,
        Route::CheckOrder,
        Route::EditProduct(12),
    ] {
        assert_eq!(t.app.open(&route), GuardDecision::Redirect(Route::Home), "{route}");
        assert_eq!(t.app.current_path(), "/");
    }
}

#[tokio::test]
async fn test_menu_per_role() {
    let t = helpers::TestApp::new().await;
    let visible = |t: &helpers::TestApp| -> Vec<Route> {
        Route::MENU
            .into_iter()
            .filter(|route| t.app.guard().check(route).is_allowed())
            .collect()
    };

    assert_eq!(visible(&t), vec![Route::Home, Route::Register, Route::Login]);

    t.login_as("customer");
    assert_eq!(
        visible(&t),
        vec![
            Route::Profile,
            Route::Home,
            Route::Register,
            Route::Login,
            Route::WorstBestSelling,
            Route::Cart,
            Route::TrackOrder,
        ]
    );

    t.login_as("admin");
    assert_eq!(visible(&t), Route::MENU.to_vec());
}

#[tokio::test]
async fn test_unknown_role_counts_as_signed_in_customer() {
    let t = helpers::TestApp::new().await;
    t.login_as("guess");

    assert!(t.app.open(&Route::TrackOrder).is_allowed());
    assert_eq!(t.app.current_path(), "/track-order");
    assert_eq!(t.app.open(&Route::ShowIncome), GuardDecision::Redirect(Route::Home));
}

#[tokio::test]
async fn test_decision_follows_logout() {
    let t = helpers::TestApp::new().await;
    t.login_as("admin");
    assert!(t.app.open(&Route::CheckOrder).is_allowed());

    t.app.session().clear_session();

    assert_eq!(t.app.open(&Route::CheckOrder), GuardDecision::Redirect(Route::Home));
    assert_eq!(t.app.open(&Route::Profile), GuardDecision::Redirect(Route::Login));
}

#[tokio::test]
async fn test_navigate_by_path() {
    let t = helpers::TestApp::new().await;
    t.login_as("admin");

    let decision = t.app.guard().navigate_path("/edit-product/5?from=home").unwrap();
    assert!(decision.is_allowed());
    assert_eq!(t.app.current_path(), "/edit-product/5");

    let err = t.app.guard().navigate_path("/checkout").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}
