use anyhow::Context;
use chrono::Utc;
use stockwise_app::{summary, AppState};
use stockwise_core::repository::{ProductReader, SalesReader};
use stockwise_insights::{Dashboard, Priority, ReportPeriod, SalesReport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockwise_app=debug,stockwise_insights=debug,stockwise_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = stockwise_store::app_config::Config::load().context("Failed to load config")?;
    tracing::info!(
        "Starting StockWise with a {} day reorder window",
        config.reorder.window_days
    );
    let top = config.display.top_suggestions;

    let state = AppState::from_config(config).context("Failed to seed stores")?;

    let dashboard = Dashboard::collect(
        state.products.as_ref(),
        state.sales.as_ref(),
        state.orders.as_ref(),
    )
    .await?;
    tracing::info!("Dashboard: {}", summary::stats_line(&dashboard.stats));

    let (products, sales) = tokio::try_join!(state.products.list_products(), state.sales.list_sales())
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to load report data")?;
    let (start, end) = ReportPeriod::Week.range(Utc::now());
    let report = SalesReport::build(&sales, &products, start, end);
    tracing::info!(
        "Last 7 days: {} transactions, revenue {:.2}, average sale {:.2}",
        report.total_transactions,
        report.total_revenue,
        report.average_sale
    );

    let suggestions = state.reorder_engine().default_suggestions().await?;
    if suggestions.is_empty() {
        println!("No reorder suggestions. All products appear to have sufficient stock.");
        return Ok(());
    }

    println!("Reorder suggestions");
    for line in summary::suggestion_lines(&suggestions, top) {
        println!("  {}", line);
    }

    let urgent: Vec<_> = suggestions
        .iter()
        .filter(|s| s.priority == Priority::High)
        .map(|s| s.to_order_item())
        .collect();
    if !urgent.is_empty() {
        println!("Draft purchase order lines for urgent items:");
        println!("{}", serde_json::to_string_pretty(&urgent)?);
    }

    Ok(())
}
