use serde::Serialize;
use stockwise_catalog::Product;
use stockwise_core::repository::{ProductRepository, PurchaseOrderRepository, RepoError, SalesRepository};
use stockwise_order::PurchaseOrder;
use stockwise_sales::Sale;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total_products: usize,
    pub low_stock_count: usize,
    pub pending_orders_count: usize,
    pub todays_revenue: f64,
    pub total_inventory_value: f64,
}

/// Snapshot behind the landing page
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub products: Vec<Product>,
    pub low_stock_products: Vec<Product>,
    pub pending_orders: Vec<PurchaseOrder>,
    pub todays_sales: Vec<Sale>,
    pub stats: DashboardStats,
}

impl Dashboard {
    /// Fetch all four views concurrently; any failure fails the whole load
    pub async fn collect(
        products: &dyn ProductRepository,
        sales: &dyn SalesRepository,
        orders: &dyn PurchaseOrderRepository,
    ) -> Result<Self, DashboardError> {
        let (all_products, low_stock_products, pending_orders, todays_sales) = tokio::try_join!(
            fetch("products", products.list_products()),
            fetch("low stock products", products.low_stock()),
            fetch("pending orders", orders.pending_orders()),
            fetch("today's sales", sales.todays_sales()),
        )?;

        Ok(Self::from_parts(all_products, low_stock_products, pending_orders, todays_sales))
    }

    pub fn from_parts(
        products: Vec<Product>,
        low_stock_products: Vec<Product>,
        pending_orders: Vec<PurchaseOrder>,
        todays_sales: Vec<Sale>,
    ) -> Self {
        let stats = DashboardStats {
            total_products: products.len(),
            low_stock_count: low_stock_products.len(),
            pending_orders_count: pending_orders.len(),
            todays_revenue: todays_sales.iter().map(|s| s.total_amount).sum(),
            total_inventory_value: products.iter().map(Product::stock_value).sum(),
        };

        Self {
            products,
            low_stock_products,
            pending_orders,
            todays_sales,
            stats,
        }
    }
}

async fn fetch<T>(
    view: &'static str,
    request: impl std::future::Future<Output = Result<T, RepoError>>,
) -> Result<T, DashboardError> {
    request.await.map_err(|source| DashboardError::Fetch { view, source })
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Failed to load dashboard data: failed to fetch {view}: {source}")]
    Fetch {
        view: &'static str,
        #[source]
        source: RepoError,
    },
}
