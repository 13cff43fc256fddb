pub mod product;
pub mod inventory;

pub use product::{
    NewProduct, Product, ProductDraft, ProductError, ProductId, ProductUpdate,
    DEFAULT_LOW_STOCK_THRESHOLD,
};
pub use inventory::{InventoryError, InventoryManager};
