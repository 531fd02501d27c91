//! Backend records and the resource catalogue

pub mod car_stock;
pub mod category;
pub mod currency;
pub mod customer;
pub mod dashboard;
pub mod lenient;
pub mod order;
pub mod payment_voucher;
pub mod product;
pub mod resource;
pub mod sale_return;
pub mod session;
pub mod user;
pub mod visit;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use car_stock::CarStockItem;
pub use category::Category;
pub use currency::Currency;
pub use customer::{Customer, PaymentType};
pub use dashboard::DashboardStats;
pub use order::{Order, OrderItem, OrderStatus, ShipmentRequest};
pub use payment_voucher::PaymentVoucher;
pub use product::Product;
pub use resource::ResourceKind;
pub use sale_return::SaleReturn;
pub use session::Session;
pub use user::{User, UserRole};
pub use visit::Visit;

/// A record the backend addresses by `id` and/or `slug`
pub trait Record:
    Serialize + DeserializeOwned + Clone + Default + std::fmt::Debug + Send + Sync + 'static
{
    fn id(&self) -> Option<u64>;
    fn slug(&self) -> Option<&str>;
}

macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> Option<u64> {
                    self.id
                }

                fn slug(&self) -> Option<&str> {
                    self.slug.as_deref()
                }
            }
        )+
    };
}

impl_record!(
    Customer,
    Product,
    Category,
    Currency,
    Order,
    ShipmentRequest,
    SaleReturn,
    PaymentVoucher,
    User,
    Visit,
);
