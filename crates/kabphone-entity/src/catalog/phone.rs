//! Phone product model.

use serde::{Deserialize, Serialize};

/// A phone listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phone {
    /// Unique product identifier.
    pub id: u64,
    /// Unit price in baht.
    #[serde(default)]
    pub price: f64,
    /// Manufacturer.
    pub brand_name: String,
    /// Model.
    pub model_name: String,
    /// Operating system.
    #[serde(default)]
    pub os: String,
    /// Units in stock.
    #[serde(default)]
    pub amount: i64,
    /// Product image, base64-encoded.
    #[serde(default)]
    pub image: Option<String>,
}

impl Phone {
    /// "Brand Model".
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand_name, self.model_name)
    }

    /// Whether any units remain.
    pub fn in_stock(&self) -> bool {
        self.amount > 0
    }
}
