use std::sync::Arc;
use stockwise_insights::ReorderEngine;
use stockwise_store::app_config::Config;
use stockwise_store::{seed, MemoryOrderRepository, MemoryProductRepository, MemorySalesRepository, SeedError};

/// Repositories and services shared by the application
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<MemoryProductRepository>,
    pub sales: Arc<MemorySalesRepository>,
    pub orders: Arc<MemoryOrderRepository>,
    pub config: Config,
}

impl AppState {
    /// Seed the in-memory stores named by the configuration
    pub fn from_config(config: Config) -> Result<Self, SeedError> {
        let latency = config.store.latency();

        let inventory = seed::load_products(config.store.products_seed.as_deref())?;
        let ledger = seed::load_sales(config.store.sales_seed.as_deref())?;
        let orders = seed::load_orders(config.store.orders_seed.as_deref())?;
        tracing::info!(
            "Seeded {} products, {} sales, {} purchase orders",
            inventory.len(),
            ledger.all().len(),
            orders.list().len()
        );

        let products = Arc::new(MemoryProductRepository::new(inventory, latency));
        let sales = Arc::new(MemorySalesRepository::new(ledger, &products, latency));
        let orders = Arc::new(MemoryOrderRepository::new(orders, latency));

        Ok(Self { products, sales, orders, config })
    }

    pub fn reorder_engine(&self) -> ReorderEngine {
        ReorderEngine::new(
            self.products.clone(),
            self.sales.clone(),
            self.config.reorder.clone(),
        )
    }
}
