use serde::de::DeserializeOwned;
use std::path::Path;
use stockwise_catalog::{InventoryError, InventoryManager, Product};
use stockwise_order::{OrderError, PurchaseOrder, PurchaseOrderManager};
use stockwise_sales::{LedgerError, Sale, SaleError, SalesLedger};

/// Failures while loading seed data
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed seed file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid seed record: {0}")]
    Invalid(String),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Invalid line in sale: {0}")]
    Sale(#[from] SaleError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

fn read_json<T: DeserializeOwned>(path: &str) -> Result<Vec<T>, SeedError> {
    let contents = std::fs::read_to_string(Path::new(path)).map_err(|source| SeedError::Io {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| SeedError::Json {
        path: path.to_string(),
        source,
    })
}

/// Products from a JSON array; no path means an empty catalog
pub fn load_products(path: Option<&str>) -> Result<InventoryManager, SeedError> {
    let Some(path) = path else {
        return Ok(InventoryManager::new());
    };
    parse_products(read_json(path)?)
}

pub fn load_sales(path: Option<&str>) -> Result<SalesLedger, SeedError> {
    let Some(path) = path else {
        return Ok(SalesLedger::new());
    };
    parse_sales(read_json(path)?)
}

pub fn load_orders(path: Option<&str>) -> Result<PurchaseOrderManager, SeedError> {
    let Some(path) = path else {
        return Ok(PurchaseOrderManager::new());
    };
    parse_orders(read_json(path)?)
}

fn parse_products(products: Vec<Product>) -> Result<InventoryManager, SeedError> {
    for product in &products {
        if !product.price.is_finite() || product.price < 0.0 {
            return Err(SeedError::Invalid(format!("product {} has price {}", product.id, product.price)));
        }
    }
    Ok(InventoryManager::with_products(products)?)
}

fn parse_orders(orders: Vec<PurchaseOrder>) -> Result<PurchaseOrderManager, SeedError> {
    Ok(PurchaseOrderManager::with_orders(orders)?)
}

/// Totals are recomputed from the lines so later aggregation can trust them
fn parse_sales(mut sales: Vec<Sale>) -> Result<SalesLedger, SeedError> {
    for sale in &mut sales {
        for item in &mut sale.items {
            item.validate()?;
            item.total_price = item.quantity as f64 * item.unit_price;
        }
        sale.total_amount = sale.items.iter().map(|item| item.total_price).sum();
    }
    Ok(SalesLedger::with_sales(sales)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_paths_give_empty_stores() {
        assert!(load_products(None).unwrap().is_empty());
        assert!(load_sales(None).unwrap().all().is_empty());
        assert!(load_orders(None).unwrap().list().is_empty());
    }

    #[test]
    fn test_unreadable_file() {
        let err = load_products(Some("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }

    #[test]
    fn test_sales_totals_recomputed() {
        let sales: Vec<Sale> = serde_json::from_value(serde_json::json!([
            {
                "id": 1,
                "timestamp": "2026-10-10T12:00:00Z",
                "items": [
                    { "product_id": 1, "quantity": 3, "unit_price": 2.0, "total_price": 0.0 }
                ],
                "total_amount": 0.0
            }
        ]))
        .unwrap();

        let ledger = parse_sales(sales).unwrap();
        assert_eq!(ledger.get(1).unwrap().total_amount, 6.0);
    }

    fn sale_with_line(quantity: u32, unit_price: f64) -> Vec<Sale> {
        serde_json::from_value(serde_json::json!([
            {
                "id": 1,
                "timestamp": "2026-10-10T12:00:00Z",
                "items": [
                    { "product_id": 1, "quantity": quantity, "unit_price": unit_price, "total_price": 0.0 }
                ],
                "total_amount": 0.0
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_sale_lines() {
        assert!(matches!(
            parse_sales(sale_with_line(0, 2.0)),
            Err(SeedError::Sale(SaleError::InvalidQuantity(1)))
        ));
        assert!(matches!(
            parse_sales(sale_with_line(2, -3.0)),
            Err(SeedError::Sale(SaleError::InvalidPrice(1)))
        ));
    }

    #[test]
    fn test_rejects_negative_product_price() {
        let products: Vec<Product> = serde_json::from_value(serde_json::json!([
            { "id": 1, "name": "Pen", "sku": "PEN", "price": -1.0, "stock_level": 1, "low_stock_threshold": 1 }
        ]))
        .unwrap();
        assert!(matches!(parse_products(products), Err(SeedError::Invalid(_))));
    }

    #[test]
    fn test_orders_validated_and_totalled() {
        let orders: Vec<PurchaseOrder> = serde_json::from_value(serde_json::json!([
            {
                "id": 1,
                "supplier": "PaperWorks Ltd",
                "items": [{ "product_id": 3, "quantity": 4, "unit_price": 2.5 }],
                "order_date": "2026-10-15T09:00:00Z",
                "status": "Pending",
                "total_amount": 0.0
            }
        ]))
        .unwrap();
        let manager = parse_orders(orders).unwrap();
        assert_eq!(manager.get(1).unwrap().total_amount, 10.0);

        let bad: Vec<PurchaseOrder> = serde_json::from_value(serde_json::json!([
            {
                "id": 2,
                "supplier": "PaperWorks Ltd",
                "items": [{ "product_id": 3, "quantity": 0, "unit_price": 2.5 }],
                "order_date": "2026-10-15T09:00:00Z",
                "status": "Pending",
                "total_amount": 0.0
            }
        ]))
        .unwrap();
        assert!(matches!(
            parse_orders(bad),
            Err(SeedError::Order(OrderError::InvalidItem(3)))
        ));
    }
}
