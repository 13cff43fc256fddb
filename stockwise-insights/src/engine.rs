use crate::models::ReorderSuggestion;
use crate::rules::{
    classify_priority, project_stock_out, rank_suggestions, should_reorder, suggested_quantity,
};
use crate::velocity::{analysis_start, compute_velocity, filter_window};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use stockwise_catalog::Product;
use stockwise_core::repository::{ProductReader, RepoError, SalesReader};
use stockwise_sales::Sale;
use stockwise_store::app_config::ReorderConfig;

/// Ranks products that need restocking, based on recent sales velocity
pub struct ReorderEngine {
    products: Arc<dyn ProductReader>,
    sales: Arc<dyn SalesReader>,
    config: ReorderConfig,
}

impl ReorderEngine {
    pub fn new(
        products: Arc<dyn ProductReader>,
        sales: Arc<dyn SalesReader>,
        config: ReorderConfig,
    ) -> Self {
        Self { products, sales, config }
    }

    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    /// Suggestions over the configured window
    pub async fn default_suggestions(&self) -> Result<Vec<ReorderSuggestion>, ReorderError> {
        self.get_suggestions(self.config.window_days).await
    }

    /// Suggestions over the trailing `days_to_analyze` days, ending now
    pub async fn get_suggestions(&self, days_to_analyze: u32) -> Result<Vec<ReorderSuggestion>, ReorderError> {
        self.get_suggestions_at(days_to_analyze, Utc::now()).await
    }

    /// Suggestions over the trailing `days_to_analyze` days, ending at `now`
    pub async fn get_suggestions_at(
        &self,
        days_to_analyze: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReorderSuggestion>, ReorderError> {
        if days_to_analyze == 0 {
            return Err(ReorderError::InvalidWindow);
        }

        let (products, sales) = tokio::try_join!(
            async {
                self.products.list_products().await.map_err(|source| {
                    ReorderError::UpstreamFetch { collaborator: "products", source }
                })
            },
            async {
                self.sales.list_sales().await.map_err(|source| {
                    ReorderError::UpstreamFetch { collaborator: "sales", source }
                })
            },
        )
        .map_err(|e| {
            tracing::error!("Reorder analysis aborted: {}", e);
            e
        })?;

        let suggestions = compute_suggestions(&products, &sales, days_to_analyze, now, &self.config);
        tracing::info!(
            "Computed {} reorder suggestions over {} days",
            suggestions.len(),
            days_to_analyze
        );
        Ok(suggestions)
    }
}

/// Pure reorder pass over catalog and sales snapshots
pub fn compute_suggestions(
    products: &[Product],
    sales: &[Sale],
    days_to_analyze: u32,
    now: DateTime<Utc>,
    config: &ReorderConfig,
) -> Vec<ReorderSuggestion> {
    let start = analysis_start(now, days_to_analyze);
    let recent = filter_window(sales, start);
    tracing::debug!(
        "Analyzing {} products, {} of {} sales since {}",
        products.len(),
        recent.len(),
        sales.len(),
        start
    );

    let (records, skipped) = compute_velocity(products, &recent, days_to_analyze);
    if skipped > 0 {
        tracing::debug!("Skipped {} sale items for products not in the catalog", skipped);
    }

    let mut suggestions: Vec<ReorderSuggestion> = records
        .into_iter()
        .filter(|record| record.total_quantity_sold > 0)
        .filter_map(|record| {
            let product = record.product;
            let velocity = record.average_daily_velocity;
            let projection = project_stock_out(product.stock_level, velocity);

            if !should_reorder(product.stock_level, product.low_stock_threshold, projection, config) {
                return None;
            }

            Some(ReorderSuggestion {
                product: product.clone(),
                velocity,
                days_until_stock_out: projection,
                suggested_quantity: suggested_quantity(velocity, product.low_stock_threshold, config),
                priority: classify_priority(product.stock_level, projection, config),
                sales_count: record.sales_count,
                total_quantity_sold: record.total_quantity_sold,
                last_sale_date: record.last_sale_date,
            })
        })
        .collect();

    rank_suggestions(&mut suggestions);
    suggestions
}

#[derive(Debug, thiserror::Error)]
pub enum ReorderError {
    #[error("Failed to calculate reorder suggestions: analysis window must be at least one day")]
    InvalidWindow,

    #[error("Failed to calculate reorder suggestions: failed to fetch {collaborator}: {source}")]
    UpstreamFetch {
        collaborator: &'static str,
        #[source]
        source: RepoError,
    },
}
