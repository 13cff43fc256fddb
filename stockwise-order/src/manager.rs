use crate::models::{OrderId, OrderStatus, PurchaseOrder, PurchaseOrderItem};
use chrono::{DateTime, Utc};
use stockwise_catalog::ProductId;

/// Manages purchase order lifecycle and state transitions
#[derive(Debug, Clone, Default)]
pub struct PurchaseOrderManager {
    orders: Vec<PurchaseOrder>,
}

impl PurchaseOrderManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load existing orders; lines are validated and totals recomputed
    pub fn with_orders(orders: Vec<PurchaseOrder>) -> Result<Self, OrderError> {
        let mut manager = Self::new();
        for mut order in orders {
            if manager.get(order.id).is_some() {
                return Err(OrderError::DuplicateId(order.id));
            }
            validate_items(&order.items)?;
            order.recalculate_total();
            manager.orders.push(order);
        }
        Ok(manager)
    }

    /// Create a new pending order
    pub fn create(
        &mut self,
        supplier: &str,
        items: Vec<PurchaseOrderItem>,
        at: DateTime<Utc>,
    ) -> Result<PurchaseOrder, OrderError> {
        let supplier = supplier.trim();
        if supplier.is_empty() {
            return Err(OrderError::MissingSupplier);
        }
        validate_items(&items)?;

        let id = self.orders.iter().map(|o| o.id).max().unwrap_or(0) + 1;
        let mut order = PurchaseOrder {
            id,
            supplier: supplier.to_string(),
            items,
            order_date: at,
            status: OrderStatus::Pending,
            total_amount: 0.0,
        };
        order.recalculate_total();

        self.orders.push(order.clone());
        Ok(order)
    }

    pub fn get(&self, id: OrderId) -> Option<&PurchaseOrder> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn list(&self) -> &[PurchaseOrder] {
        &self.orders
    }

    pub fn pending(&self) -> Vec<PurchaseOrder> {
        self.orders.iter().filter(|o| o.is_pending()).cloned().collect()
    }

    /// Replace the lines of an order
    pub fn update_items(&mut self, id: OrderId, items: Vec<PurchaseOrderItem>) -> Result<PurchaseOrder, OrderError> {
        validate_items(&items)?;
        let order = self.get_mut(id)?;
        order.items = items;
        order.recalculate_total();
        Ok(order.clone())
    }

    /// Transition: Pending → Received
    pub fn mark_received(&mut self, id: OrderId) -> Result<PurchaseOrder, OrderError> {
        self.transition(id, OrderStatus::Received)
    }

    /// Transition: Pending → Cancelled
    pub fn cancel(&mut self, id: OrderId) -> Result<PurchaseOrder, OrderError> {
        self.transition(id, OrderStatus::Cancelled)
    }

    pub fn remove(&mut self, id: OrderId) -> Result<PurchaseOrder, OrderError> {
        let index = self.orders.iter().position(|o| o.id == id)
            .ok_or(OrderError::NotFound(id))?;
        Ok(self.orders.remove(index))
    }

    /// Only pending orders move; everything else is final
    fn transition(&mut self, id: OrderId, to: OrderStatus) -> Result<PurchaseOrder, OrderError> {
        let order = self.get_mut(id)?;

        if order.status != OrderStatus::Pending {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to,
            });
        }

        order.status = to;
        Ok(order.clone())
    }

    fn get_mut(&mut self, id: OrderId) -> Result<&mut PurchaseOrder, OrderError> {
        self.orders.iter_mut().find(|o| o.id == id)
            .ok_or(OrderError::NotFound(id))
    }
}

fn validate_items(items: &[PurchaseOrderItem]) -> Result<(), OrderError> {
    if items.is_empty() {
        return Err(OrderError::NoItems);
    }
    for item in items {
        if item.quantity == 0 || !item.unit_price.is_finite() || item.unit_price < 0.0 {
            return Err(OrderError::InvalidItem(item.product_id));
        }
    }
    Ok(())
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    #[error("Duplicate order id: {0}")]
    DuplicateId(OrderId),

    #[error("Invalid state transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Supplier is required")]
    MissingSupplier,

    #[error("Order has no items")]
    NoItems,

    #[error("Invalid quantity or price for product {0}")]
    InvalidItem(ProductId),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: u32, unit_price: f64) -> PurchaseOrderItem {
        PurchaseOrderItem {
            product_id: 1,
            product_name: "Printer Paper".to_string(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_order_lifecycle() {
        let mut manager = PurchaseOrderManager::new();

        let order = manager.create("Office Depot", vec![item(20, 4.0)], Utc::now()).unwrap();
        assert_eq!(order.id, 1);
        assert_eq!(order.total_amount, 80.0);
        assert_eq!(manager.pending().len(), 1);

        // Pending → Received
        let received = manager.mark_received(order.id).unwrap();
        assert_eq!(received.status, OrderStatus::Received);
        assert!(manager.pending().is_empty());
    }

    #[test]
    fn test_invalid_transition() {
        let mut manager = PurchaseOrderManager::new();
        let order = manager.create("Acme", vec![item(1, 1.0)], Utc::now()).unwrap();

        manager.cancel(order.id).unwrap();

        // Cancelled orders cannot be received
        assert_eq!(
            manager.mark_received(order.id),
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Cancelled,
                to: OrderStatus::Received,
            })
        );
    }

    #[test]
    fn test_create_validation() {
        let mut manager = PurchaseOrderManager::new();

        assert_eq!(manager.create("  ", vec![item(1, 1.0)], Utc::now()), Err(OrderError::MissingSupplier));
        assert_eq!(manager.create("Acme", vec![], Utc::now()), Err(OrderError::NoItems));
        assert_eq!(manager.create("Acme", vec![item(0, 1.0)], Utc::now()), Err(OrderError::InvalidItem(1)));
    }

    #[test]
    fn test_update_items_recomputes_total() {
        let mut manager = PurchaseOrderManager::new();
        let order = manager.create("Acme", vec![item(1, 1.0)], Utc::now()).unwrap();

        let updated = manager.update_items(order.id, vec![item(3, 2.0), item(1, 0.5)]).unwrap();
        assert_eq!(updated.total_amount, 6.5);

        manager.remove(order.id).unwrap();
        assert_eq!(manager.update_items(order.id, vec![item(1, 1.0)]), Err(OrderError::NotFound(order.id)));
    }

    #[test]
    fn test_with_orders_validates_lines() {
        let order = |id: OrderId, items: Vec<PurchaseOrderItem>| PurchaseOrder {
            id,
            supplier: "Acme".to_string(),
            items,
            order_date: Utc::now(),
            status: OrderStatus::Received,
            total_amount: 999.0,
        };

        let manager = PurchaseOrderManager::with_orders(vec![order(4, vec![item(5, 2.0)])]).unwrap();
        assert_eq!(manager.get(4).unwrap().total_amount, 10.0);

        assert_eq!(
            PurchaseOrderManager::with_orders(vec![order(1, vec![item(2, -1.0)])]).unwrap_err(),
            OrderError::InvalidItem(1)
        );
        assert_eq!(
            PurchaseOrderManager::with_orders(vec![order(1, vec![item(0, 1.0)])]).unwrap_err(),
            OrderError::InvalidItem(1)
        );
        assert_eq!(
            PurchaseOrderManager::with_orders(vec![order(1, vec![])]).unwrap_err(),
            OrderError::NoItems
        );
    }
}
