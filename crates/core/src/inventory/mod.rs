pub mod service;

pub use service::CarStockService;
