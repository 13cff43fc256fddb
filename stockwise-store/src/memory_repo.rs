use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use stockwise_catalog::{InventoryError, InventoryManager, Product, ProductDraft, ProductId, ProductUpdate};
use stockwise_core::repository::{
    ProductReader, ProductRepository, PurchaseOrderRepository, RepoResult, SalesReader,
    SalesRepository,
};
use stockwise_core::CoreError;
use stockwise_order::{OrderId, OrderStatus, PurchaseOrder, PurchaseOrderItem, PurchaseOrderManager};
use stockwise_sales::{DailySummary, Sale, SaleDraft, SaleId, SalesLedger};

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

/// Product catalog kept in process memory
pub struct MemoryProductRepository {
    inventory: Arc<RwLock<InventoryManager>>,
    latency: Duration,
}

impl MemoryProductRepository {
    pub fn new(inventory: InventoryManager, latency: Duration) -> Self {
        Self {
            inventory: Arc::new(RwLock::new(inventory)),
            latency,
        }
    }

    /// Handle to the catalog for collaborators that move stock
    pub fn shared_inventory(&self) -> Arc<RwLock<InventoryManager>> {
        self.inventory.clone()
    }
}

#[async_trait]
impl ProductReader for MemoryProductRepository {
    async fn list_products(&self) -> RepoResult<Vec<Product>> {
        simulate_latency(self.latency).await;
        Ok(self.inventory.read().await.list().to_vec())
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>> {
        simulate_latency(self.latency).await;
        Ok(self.inventory.read().await.get(id).cloned())
    }

    async fn find_by_barcode(&self, code: &str) -> RepoResult<Option<Product>> {
        simulate_latency(self.latency).await;
        Ok(self.inventory.read().await.find_by_barcode(code).cloned())
    }

    async fn search_products(&self, query: &str) -> RepoResult<Vec<Product>> {
        simulate_latency(self.latency).await;
        Ok(self.inventory.read().await.search(query).into_iter().cloned().collect())
    }

    async fn create_product(&self, draft: ProductDraft) -> RepoResult<Product> {
        simulate_latency(self.latency).await;
        let created = self.inventory.write().await.add_draft(draft).map_err(CoreError::from)?;
        tracing::info!("Created product {} ({})", created.id, created.sku);
        Ok(created)
    }

    async fn update_product(&self, id: ProductId, update: ProductUpdate) -> RepoResult<Product> {
        simulate_latency(self.latency).await;
        let product = self.inventory.write().await.update(id, update).map_err(CoreError::from)?;
        Ok(product)
    }

    async fn delete_product(&self, id: ProductId) -> RepoResult<Product> {
        simulate_latency(self.latency).await;
        let product = self.inventory.write().await.remove(id).map_err(CoreError::from)?;
        tracing::info!("Deleted product {}", id);
        Ok(product)
    }

    async fn low_stock(&self) -> RepoResult<Vec<Product>> {
        simulate_latency(self.latency).await;
        Ok(self.inventory.read().await.low_stock())
    }

    async fn update_stock(&self, id: ProductId, level: u32) -> RepoResult<Product> {
        simulate_latency(self.latency).await;
        let product = self.inventory.write().await.set_stock(id, level).map_err(CoreError::from)?;
        Ok(product)
    }
}

/// Sales history kept in process memory; recording a sale moves stock
pub struct MemorySalesRepository {
    ledger: RwLock<SalesLedger>,
    inventory: Arc<RwLock<InventoryManager>>,
    latency: Duration,
}

impl MemorySalesRepository {
    pub fn new(ledger: SalesLedger, products: &MemoryProductRepository, latency: Duration) -> Self {
        Self {
            ledger: RwLock::new(ledger),
            inventory: products.shared_inventory(),
            latency,
        }
    }
}

#[async_trait]
impl SalesReader for MemorySalesRepository {
    async fn list_sales(&self) -> RepoResult<Vec<Sale>> {
        simulate_latency(self.latency).await;
        Ok(self.ledger.read().await.all().to_vec())
    }
}

#[async_trait]
impl SalesRepository for MemorySalesRepository {
    async fn get_sale(&self, id: SaleId) -> RepoResult<Option<Sale>> {
        simulate_latency(self.latency).await;
        Ok(self.ledger.read().await.get(id).cloned())
    }

    async fn record_sale(&self, draft: SaleDraft) -> RepoResult<Sale> {
        simulate_latency(self.latency).await;

        // Inventory before ledger, always
        let mut inventory = self.inventory.write().await;
        draft.check_stock(&inventory).map_err(CoreError::from)?;

        let sale = self.ledger.write().await
            .record(draft, Utc::now())
            .map_err(CoreError::from)?;

        for item in &sale.items {
            match inventory.deduct(item.product_id, item.quantity) {
                Ok(product) => {
                    tracing::debug!("Stock for product {} now {}", product.id, product.stock_level);
                }
                Err(InventoryError::NotFound(id)) => {
                    tracing::warn!("Sale {} references unknown product {}; stock not updated", sale.id, id);
                }
                Err(e) => return Err(CoreError::from(e).into()),
            }
        }

        tracing::info!("Recorded sale {} for {:.2}", sale.id, sale.total_amount);
        Ok(sale)
    }

    async fn delete_sale(&self, id: SaleId) -> RepoResult<Sale> {
        simulate_latency(self.latency).await;
        let sale = self.ledger.write().await.remove(id).map_err(CoreError::from)?;
        Ok(sale)
    }

    async fn sales_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> RepoResult<Vec<Sale>> {
        simulate_latency(self.latency).await;
        Ok(self.ledger.read().await.in_range(start, end))
    }

    async fn todays_sales(&self) -> RepoResult<Vec<Sale>> {
        simulate_latency(self.latency).await;
        Ok(self.ledger.read().await.on_day(Utc::now().date_naive()))
    }

    async fn daily_summary(&self, date: NaiveDate) -> RepoResult<DailySummary> {
        simulate_latency(self.latency).await;
        Ok(self.ledger.read().await.daily_summary(date))
    }
}

/// Purchase orders kept in process memory
pub struct MemoryOrderRepository {
    orders: RwLock<PurchaseOrderManager>,
    latency: Duration,
}

impl MemoryOrderRepository {
    pub fn new(orders: PurchaseOrderManager, latency: Duration) -> Self {
        Self {
            orders: RwLock::new(orders),
            latency,
        }
    }
}

#[async_trait]
impl PurchaseOrderRepository for MemoryOrderRepository {
    async fn list_orders(&self) -> RepoResult<Vec<PurchaseOrder>> {
        simulate_latency(self.latency).await;
        Ok(self.orders.read().await.list().to_vec())
    }

    async fn get_order(&self, id: OrderId) -> RepoResult<Option<PurchaseOrder>> {
        simulate_latency(self.latency).await;
        Ok(self.orders.read().await.get(id).cloned())
    }

    async fn create_order(&self, supplier: &str, items: Vec<PurchaseOrderItem>) -> RepoResult<PurchaseOrder> {
        simulate_latency(self.latency).await;
        let order = self.orders.write().await
            .create(supplier, items, Utc::now())
            .map_err(CoreError::from)?;
        tracing::info!("Created purchase order {} with {}", order.id, order.supplier);
        Ok(order)
    }

    async fn update_order_items(&self, id: OrderId, items: Vec<PurchaseOrderItem>) -> RepoResult<PurchaseOrder> {
        simulate_latency(self.latency).await;
        let order = self.orders.write().await.update_items(id, items).map_err(CoreError::from)?;
        Ok(order)
    }

    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> RepoResult<PurchaseOrder> {
        simulate_latency(self.latency).await;
        let mut orders = self.orders.write().await;
        let order = match status {
            OrderStatus::Received => orders.mark_received(id),
            OrderStatus::Cancelled => orders.cancel(id),
            OrderStatus::Pending => {
                return Err(CoreError::ValidationError(format!(
                    "order {} cannot be moved back to pending",
                    id
                ))
                .into())
            }
        }
        .map_err(CoreError::from)?;
        tracing::info!("Order {} marked as {:?}", order.id, order.status);
        Ok(order)
    }

    async fn pending_orders(&self) -> RepoResult<Vec<PurchaseOrder>> {
        simulate_latency(self.latency).await;
        Ok(self.orders.read().await.pending())
    }

    async fn delete_order(&self, id: OrderId) -> RepoResult<PurchaseOrder> {
        simulate_latency(self.latency).await;
        let order = self.orders.write().await.remove(id).map_err(CoreError::from)?;
        Ok(order)
    }
}
