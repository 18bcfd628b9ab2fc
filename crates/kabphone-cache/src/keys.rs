//! Query keys and the builders for every key the storefront uses.
//!
//! Centralising key construction keeps invalidation prefixes and the keys
//! they are meant to hit in one place.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One element of a [`QueryKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyPart {
    /// Absent value.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integer such as a page index or an ID.
    Int(i64),
    /// Text such as a resource name or a search term.
    Str(String),
}

impl From<&str> for KeyPart {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for KeyPart {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for KeyPart {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for KeyPart {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for KeyPart {
    fn from(value: u64) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl<T: Into<KeyPart>> From<Option<T>> for KeyPart {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Ordered tuple identifying a cached request.
///
/// The first part names the resource; later parts are its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey(Vec<KeyPart>);

impl QueryKey {
    /// A key consisting of only the resource name.
    pub fn new(resource: impl Into<KeyPart>) -> Self {
        Self(vec![resource.into()])
    }

    /// Append a parameter.
    pub fn with(mut self, part: impl Into<KeyPart>) -> Self {
        self.0.push(part.into());
        self
    }

    /// All parts, resource first.
    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    /// Whether `prefix` matches the leading parts of this key. A key is its
    /// own prefix.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.0) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}

/// Resource name of the product listing.
pub const PHONES: &str = "phones";
/// Resource name of a single product.
pub const PHONE: &str = "phone";
/// Resource name of the current user's cart.
pub const CART: &str = "cart";
/// Resource name of the cart badge count.
pub const CART_ITEM_COUNT: &str = "cartItemCount";
/// Resource name of the order history.
pub const ORDER_HISTORY: &str = "orderHistory";
/// Resource name of a tracking-number lookup.
pub const TRACK_ORDER: &str = "trackOrder";
/// Resource name of the admin order list.
pub const ADMIN_ORDERS: &str = "adminOrders";
/// Resource name of the income summary.
pub const TOTAL_INCOME: &str = "totalIncome";
/// Resource name of the best/worst seller summary.
pub const WORST_BEST_SELLING: &str = "worstBestSelling";
/// Resource name of the current user's profile.
pub const PROFILE: &str = "profile";

// ── Catalog ───────────────────────────────────────────────

/// `("phones", page, search)`.
pub fn phones(page: u32, search: &str) -> QueryKey {
    QueryKey::new(PHONES).with(page).with(search)
}

/// Prefix matching every product listing page.
pub fn phones_prefix() -> QueryKey {
    QueryKey::new(PHONES)
}

/// `("phone", id)`.
pub fn phone(id: u64) -> QueryKey {
    QueryKey::new(PHONE).with(id)
}

// ── Cart ──────────────────────────────────────────────────

/// `("cart")`.
pub fn cart() -> QueryKey {
    QueryKey::new(CART)
}

/// `("cartItemCount")`.
pub fn cart_item_count() -> QueryKey {
    QueryKey::new(CART_ITEM_COUNT)
}

// ── Orders ────────────────────────────────────────────────

/// `("orderHistory", page)`.
pub fn order_history(page: u32) -> QueryKey {
    QueryKey::new(ORDER_HISTORY).with(page)
}

/// Prefix matching every order history page.
pub fn order_history_prefix() -> QueryKey {
    QueryKey::new(ORDER_HISTORY)
}

/// `("trackOrder", tracking_number)`.
pub fn track_order(tracking_number: &str) -> QueryKey {
    QueryKey::new(TRACK_ORDER).with(tracking_number)
}

/// `("adminOrders")`.
pub fn admin_orders() -> QueryKey {
    QueryKey::new(ADMIN_ORDERS)
}

// ── Analytics ─────────────────────────────────────────────

/// `("totalIncome")`.
pub fn total_income() -> QueryKey {
    QueryKey::new(TOTAL_INCOME)
}

/// `("worstBestSelling")`.
pub fn worst_best_selling() -> QueryKey {
    QueryKey::new(WORST_BEST_SELLING)
}

// ── Users ─────────────────────────────────────────────────

/// `("profile")`.
pub fn profile() -> QueryKey {
    QueryKey::new(PROFILE)
}
