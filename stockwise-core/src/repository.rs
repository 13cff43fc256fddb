use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use stockwise_catalog::{Product, ProductDraft, ProductId, ProductUpdate};
use stockwise_order::{OrderId, OrderStatus, PurchaseOrder, PurchaseOrderItem};
use stockwise_sales::{DailySummary, Sale, SaleDraft, SaleId};

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;
pub type RepoResult<T> = Result<T, RepoError>;

/// Read access to the full product catalog
#[async_trait]
pub trait ProductReader: Send + Sync {
    async fn list_products(&self) -> RepoResult<Vec<Product>>;
}

/// Read access to the full sales history
#[async_trait]
pub trait SalesReader: Send + Sync {
    async fn list_sales(&self) -> RepoResult<Vec<Sale>>;
}

/// Repository trait for product catalog access
#[async_trait]
pub trait ProductRepository: ProductReader {
    async fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>>;

    /// Resolve a scanned barcode to a product
    async fn find_by_barcode(&self, code: &str) -> RepoResult<Option<Product>>;

    /// Case-insensitive match on name, SKU or category
    async fn search_products(&self, query: &str) -> RepoResult<Vec<Product>>;

    /// Validate form input and add it to the catalog
    async fn create_product(&self, draft: ProductDraft) -> RepoResult<Product>;

    async fn update_product(&self, id: ProductId, update: ProductUpdate) -> RepoResult<Product>;

    async fn delete_product(&self, id: ProductId) -> RepoResult<Product>;

    async fn low_stock(&self) -> RepoResult<Vec<Product>>;

    async fn update_stock(&self, id: ProductId, level: u32) -> RepoResult<Product>;
}

/// Repository trait for sales history access
#[async_trait]
pub trait SalesRepository: SalesReader {
    async fn get_sale(&self, id: SaleId) -> RepoResult<Option<Sale>>;

    /// Record a sale and take its units out of stock
    async fn record_sale(&self, draft: SaleDraft) -> RepoResult<Sale>;

    async fn delete_sale(&self, id: SaleId) -> RepoResult<Sale>;

    async fn sales_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> RepoResult<Vec<Sale>>;

    async fn todays_sales(&self) -> RepoResult<Vec<Sale>>;

    async fn daily_summary(&self, date: NaiveDate) -> RepoResult<DailySummary>;
}

/// Repository trait for purchase order access
#[async_trait]
pub trait PurchaseOrderRepository: Send + Sync {
    async fn list_orders(&self) -> RepoResult<Vec<PurchaseOrder>>;

    async fn get_order(&self, id: OrderId) -> RepoResult<Option<PurchaseOrder>>;

    async fn create_order(&self, supplier: &str, items: Vec<PurchaseOrderItem>) -> RepoResult<PurchaseOrder>;

    async fn update_order_items(&self, id: OrderId, items: Vec<PurchaseOrderItem>) -> RepoResult<PurchaseOrder>;

    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> RepoResult<PurchaseOrder>;

    async fn pending_orders(&self) -> RepoResult<Vec<PurchaseOrder>>;

    async fn delete_order(&self, id: OrderId) -> RepoResult<PurchaseOrder>;
}
