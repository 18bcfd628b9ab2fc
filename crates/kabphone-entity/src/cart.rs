//! Shopping cart entities.

use serde::{Deserialize, Serialize};

use crate::catalog::Phone;

/// A user's cart. A confirmed cart becomes part of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: u64,
    /// Line items.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Owner.
    #[serde(default)]
    pub user_id: u64,
    /// `pending` until checkout.
    #[serde(default)]
    pub status: String,
}

impl Cart {
    /// Σ amount × unit price.
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(Item::subtotal).sum()
    }

    /// Σ amount, shown as the header badge.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Find a line item by ID.
    pub fn item(&self, item_id: u64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == item_id)
    }
}

/// A cart line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item identifier.
    pub id: u64,
    /// Quantity.
    pub amount: i64,
    /// Product ID.
    pub phone_id: u64,
    /// Product snapshot.
    pub phone: Phone,
    /// Owning cart.
    #[serde(default)]
    pub cart_id: u64,
}

impl Item {
    /// amount × unit price.
    pub fn subtotal(&self) -> f64 {
        self.amount as f64 * self.phone.price
    }
}

/// Body of `POST /carts/items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddItemRequest {
    /// The item to add.
    pub item: NewItem,
}

/// Item part of [`AddItemRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    /// Quantity.
    pub amount: i64,
    /// Product ID.
    pub phone_id: u64,
}

impl AddItemRequest {
    /// Add `amount` units of `phone_id`.
    pub fn new(phone_id: u64, amount: i64) -> Self {
        Self {
            item: NewItem { amount, phone_id },
        }
    }
}

/// Body of `PATCH /carts/items/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    /// New quantity.
    pub amount: i64,
}
