use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use stockwise_catalog::{InventoryManager, ProductId};

pub type SaleId = u32;

/// A completed checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: SaleId,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<SaleItem>,
    pub total_amount: f64,
}

impl Sale {
    /// Units across all lines
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// One product line within a sale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
}

impl SaleItem {
    /// Same checks a till entry goes through
    pub fn validate(&self) -> Result<(), SaleError> {
        check_line(self.product_id, self.quantity, self.unit_price)
    }
}

fn check_line(product_id: ProductId, quantity: u32, unit_price: f64) -> Result<(), SaleError> {
    if quantity == 0 {
        return Err(SaleError::InvalidQuantity(product_id));
    }
    if !unit_price.is_finite() || unit_price < 0.0 {
        return Err(SaleError::InvalidPrice(product_id));
    }
    Ok(())
}

/// Sale as entered at the till, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaleDraft {
    pub items: Vec<SaleLineDraft>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLineDraft {
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl SaleDraft {
    /// Validate lines and compute totals
    pub fn into_items(self) -> Result<Vec<SaleItem>, SaleError> {
        if self.items.is_empty() {
            return Err(SaleError::Empty);
        }

        self.items
            .into_iter()
            .map(|line| {
                check_line(line.product_id, line.quantity, line.unit_price)?;
                Ok(SaleItem {
                    product_id: line.product_id,
                    product_name: line.product_name,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    total_price: line.quantity as f64 * line.unit_price,
                })
            })
            .collect()
    }

    /// Reject lines asking for more units than are on hand.
    ///
    /// Lines for the same product are summed. Products missing from the
    /// catalog are not checked.
    pub fn check_stock(&self, inventory: &InventoryManager) -> Result<(), SaleError> {
        let mut requested: HashMap<ProductId, u64> = HashMap::new();
        for line in &self.items {
            *requested.entry(line.product_id).or_insert(0) += u64::from(line.quantity);
        }

        for line in &self.items {
            let Some(product) = inventory.get(line.product_id) else { continue };
            let wanted = requested[&line.product_id];
            if u64::from(product.stock_level) < wanted {
                return Err(SaleError::InsufficientStock {
                    product: product.name.clone(),
                    requested: wanted,
                    available: product.stock_level,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SaleError {
    #[error("Sale has no items")]
    Empty,

    #[error("Quantity must be positive for product {0}")]
    InvalidQuantity(ProductId),

    #[error("Unit price must be a non-negative number for product {0}")]
    InvalidPrice(ProductId),

    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u64,
        available: u32,
    },
}
