//! Customer records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;
use crate::impl_wire_enum;

/// How a customer settles invoices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentType {
    Cash,
    Credit,
}

impl_wire_enum!(PaymentType {
    Cash => "cash",
    Credit => "credit",
});

/// Customer as served by `admin/customers`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Raw wire value; see [`Customer::payment_type`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Fields this client does not model, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Customer {
    pub fn payment_type(&self) -> Option<PaymentType> {
        self.payment_type.as_deref().and_then(|raw| raw.parse().ok())
    }
}
