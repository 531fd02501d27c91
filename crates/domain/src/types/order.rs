//! Orders and shipment requests

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;
use crate::impl_wire_enum;

/// Order lifecycle as the backend spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Approved,
    Shipped,
    Delivered,
    Cancelled,
}

impl_wire_enum!(OrderStatus {
    Pending => "pending",
    Approved => "approved",
    Shipped => "shipped",
    Delivered => "delivered",
    Cancelled => "cancelled",
});

/// One line of an order, shipment request or return
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderItem {
    /// Line total, computed when the backend did not send one.
    pub fn line_total(&self) -> Option<f64> {
        self.total.or_else(|| Some(self.quantity? * self.price?))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<OrderItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    pub fn status(&self) -> Option<OrderStatus> {
        self.status.as_deref().and_then(|raw| raw.parse().ok())
    }

    /// Sum of line totals, ignoring lines without enough data.
    pub fn items_total(&self) -> f64 {
        self.items.iter().filter_map(OrderItem::line_total).sum()
    }
}

/// Stock transfer request raised by a representative
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<OrderItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ShipmentRequest {
    pub fn status(&self) -> Option<OrderStatus> {
        self.status.as_deref().and_then(|raw| raw.parse().ok())
    }
}
