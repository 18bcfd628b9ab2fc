//! Order model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;

/// A confirmed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: u64,
    /// Parcel tracking number (empty until fulfilled).
    #[serde(default)]
    pub tracking_number: String,
    /// The confirmed cart.
    #[serde(default)]
    pub cart_id: u64,
    /// Cart snapshot, when the endpoint includes it.
    #[serde(default)]
    pub cart: Option<Cart>,
    /// Total charged.
    #[serde(default)]
    pub total_price: f64,
    /// Delivery flag set by an admin.
    #[serde(default, rename = "isDelivered", alias = "is_delivered")]
    pub is_delivered: bool,
    /// When the order was placed.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// One "2x Brand Model" entry per line item.
    pub fn item_summary(&self) -> Vec<String> {
        self.cart
            .as_ref()
            .map(|cart| {
                cart.items
                    .iter()
                    .map(|item| format!("{}x {}", item.amount, item.phone.display_name()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
