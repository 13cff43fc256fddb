pub mod repository;

pub use repository::{
    ProductReader, ProductRepository, PurchaseOrderRepository, RepoError, RepoResult,
    SalesReader, SalesRepository,
};

use stockwise_catalog::{InventoryError, ProductId};
use stockwise_order::OrderError;
use stockwise_sales::{LedgerError, SaleError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Product not found: {0}")]
    UnknownProduct(ProductId),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Sale(#[from] SaleError),
    #[error(transparent)]
    Order(#[from] OrderError),
}

pub type CoreResult<T> = Result<T, CoreError>;
