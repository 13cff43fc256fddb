use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use stockwise_catalog::ProductId;

pub type OrderId = u32;

/// Purchase order status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum OrderStatus {
    Pending,
    Received,
    Cancelled,
}

/// A restocking order placed with a supplier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseOrder {
    pub id: OrderId,
    pub supplier: String,
    pub items: Vec<PurchaseOrderItem>,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: f64,
}

impl PurchaseOrder {
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Recalculate the total from the current lines
    pub fn recalculate_total(&mut self) {
        self.total_amount = self.items.iter().map(PurchaseOrderItem::line_total).sum();
    }
}

/// A product line on a purchase order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseOrderItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl PurchaseOrderItem {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}
