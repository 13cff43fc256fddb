pub mod models;
pub mod manager;

pub use models::{OrderId, OrderStatus, PurchaseOrder, PurchaseOrderItem};
pub use manager::{OrderError, PurchaseOrderManager};
