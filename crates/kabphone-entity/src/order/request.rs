//! Request payloads for the order endpoints.

use serde::{Deserialize, Serialize};

/// Body of `PUT /orders/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateOrderStatus {
    /// Whether the parcel has been delivered.
    #[serde(rename = "isDelivered")]
    pub is_delivered: bool,
}

/// Body of `POST /orders/add-tracking`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddTrackingRequest {
    /// The order being fulfilled.
    pub order_id: u64,
    /// Carrier tracking number.
    pub tracking_number: String,
}
