//! Backend resources and their admin endpoints

use serde::{Deserialize, Serialize};

use crate::constants::ADMIN_PREFIX;

/// Every resource the dashboard talks to under the admin prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Customers,
    Products,
    Categories,
    Currencies,
    Orders,
    ShipmentRequests,
    SaleReturns,
    PaymentVouchers,
    Users,
    Admins,
    Visits,
    CarStocks,
    Dashboard,
}

impl ResourceKind {
    pub const ALL: [Self; 13] = [
        Self::Customers,
        Self::Products,
        Self::Categories,
        Self::Currencies,
        Self::Orders,
        Self::ShipmentRequests,
        Self::SaleReturns,
        Self::PaymentVouchers,
        Self::Users,
        Self::Admins,
        Self::Visits,
        Self::CarStocks,
        Self::Dashboard,
    ];

    /// URL segment under `admin/`.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Currencies => "currencies",
            Self::Orders => "orders",
            Self::ShipmentRequests => "shipment-requests",
            Self::SaleReturns => "sale-returns",
            Self::PaymentVouchers => "payment-vouchers",
            Self::Users => "users",
            Self::Admins => "admins",
            Self::Visits => "visits",
            Self::CarStocks => "car-stocks",
            Self::Dashboard => "dashboard",
        }
    }

    /// JSON key the backend uses for a list of this resource.
    pub fn collection_key(self) -> &'static str {
        match self {
            Self::ShipmentRequests => "shipment_requests",
            Self::SaleReturns => "sale_returns",
            Self::PaymentVouchers => "payment_vouchers",
            Self::CarStocks => "car_stocks",
            other => other.segment(),
        }
    }

    /// JSON key the backend uses for a single record.
    pub fn singular_key(self) -> &'static str {
        match self {
            Self::Customers => "customer",
            Self::Products => "product",
            Self::Categories => "category",
            Self::Currencies => "currency",
            Self::Orders => "order",
            Self::ShipmentRequests => "shipment_request",
            Self::SaleReturns => "sale_return",
            Self::PaymentVouchers => "payment_voucher",
            Self::Users => "user",
            Self::Admins => "admin",
            Self::Visits => "visit",
            Self::CarStocks => "car_stock",
            Self::Dashboard => "dashboard",
        }
    }

    /// Collection endpoint, e.g. `admin/customers`.
    pub fn path(self) -> String {
        format!("{ADMIN_PREFIX}/{}", self.segment())
    }

    /// Member endpoint, e.g. `admin/customers/abc-slug`.
    pub fn member_path(self, slug: &str) -> String {
        format!("{ADMIN_PREFIX}/{}/{}", self.segment(), slug.trim_matches('/'))
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.segment())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.segment() == wanted)
            .ok_or_else(|| format!("Invalid ResourceKind: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_admin_prefixed() {
        assert_eq!(ResourceKind::Customers.path(), "admin/customers");
        assert_eq!(ResourceKind::SaleReturns.path(), "admin/sale-returns");
        assert_eq!(ResourceKind::Customers.member_path("abc-slug"), "admin/customers/abc-slug");
        assert_eq!(ResourceKind::CarStocks.member_path("/rep-1/"), "admin/car-stocks/rep-1");
    }

    #[test]
    fn parses_segments_and_snake_case() {
        assert_eq!("payment-vouchers".parse(), Ok(ResourceKind::PaymentVouchers));
        assert_eq!("Shipment_Requests".parse(), Ok(ResourceKind::ShipmentRequests));
        assert!("widgets".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn every_kind_round_trips_through_display() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.to_string().parse::<ResourceKind>(), Ok(kind));
        }
    }
}
