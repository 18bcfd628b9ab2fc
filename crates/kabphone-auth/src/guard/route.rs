//! The storefront's navigable views and what each one requires.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Who may see a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteRequirement {
    /// Anyone.
    Public,
    /// Any holder of a token.
    Authenticated,
    /// Holders of a token whose role claim is `admin`.
    AdminOnly,
}

/// A navigable view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, the product listing.
    Home,
    /// `/login`.
    Login,
    /// `/register`.
    Register,
    /// `/profile`.
    Profile,
    /// `/cart`.
    Cart,
    /// `/track-order`.
    TrackOrder,
    /// `/worst-best-selling`.
    WorstBestSelling,
    /// `/show-income`.
    ShowIncome,
    /// `/add-product`.
    AddProduct,
    /// `/edit-product/:id`.
    EditProduct(u64),
    /// `/check-order`.
    CheckOrder,
}

impl Route {
    /// Every fixed route, in navigation-menu order.
    pub const MENU: [Route; 10] = [
        Route::Profile,
        Route::Home,
        Route::Register,
        Route::Login,
        Route::WorstBestSelling,
        Route::ShowIncome,
        Route::Cart,
        Route::TrackOrder,
        Route::AddProduct,
        Route::CheckOrder,
    ];

    /// Resolve a path such as `/edit-product/12`. Query strings, fragments,
    /// and a trailing slash are ignored.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        let route = match path {
            "" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/profile" => Self::Profile,
            "/cart" => Self::Cart,
            "/track-order" => Self::TrackOrder,
            "/worst-best-selling" => Self::WorstBestSelling,
            "/show-income" => Self::ShowIncome,
            "/add-product" => Self::AddProduct,
            "/check-order" => Self::CheckOrder,
            other => {
                let id = other.strip_prefix("/edit-product/")?;
                Self::EditProduct(id.parse().ok()?)
            }
        };
        Some(route)
    }

    /// The path this route is served at.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::Cart => "/cart".to_string(),
            Self::TrackOrder => "/track-order".to_string(),
            Self::WorstBestSelling => "/worst-best-selling".to_string(),
            Self::ShowIncome => "/show-income".to_string(),
            Self::AddProduct => "/add-product".to_string(),
            Self::EditProduct(id) => format!("/edit-product/{id}"),
            Self::CheckOrder => "/check-order".to_string(),
        }
    }

    /// Static access requirement of the view.
    pub fn requirement(&self) -> RouteRequirement {
        match self {
            Self::Home | Self::Login | Self::Register => RouteRequirement::Public,
            Self::Profile | Self::Cart | Self::TrackOrder | Self::WorstBestSelling => {
                RouteRequirement::Authenticated
            }
            Self::ShowIncome | Self::AddProduct | Self::EditProduct(_) | Self::CheckOrder => {
                RouteRequirement::AdminOnly
            }
        }
    }

    /// Menu title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Products",
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Profile => "Profile",
            Self::Cart => "Cart",
            Self::TrackOrder => "Track Order",
            Self::WorstBestSelling => "Worst-Best Selling",
            Self::ShowIncome => "Show Income",
            Self::AddProduct => "Add Product",
            Self::EditProduct(_) => "Edit Product",
            Self::CheckOrder => "Check Order",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
