//! Stock loaded in a representative's car

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarStockItem {
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CarStockItem {
    /// Product name, falling back to a nested `product.name`.
    pub fn display_name(&self) -> Option<&str> {
        self.product_name.as_deref().or_else(|| {
            self.extra.get("product").and_then(|p| p.get("name")).and_then(Value::as_str)
        })
    }
}
