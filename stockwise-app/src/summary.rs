use stockwise_insights::{DashboardStats, ReorderSuggestion};

/// One line per suggestion, highest priority first, capped at `limit`
pub fn suggestion_lines(suggestions: &[ReorderSuggestion], limit: usize) -> Vec<String> {
    let mut lines: Vec<String> = suggestions
        .iter()
        .take(limit)
        .map(|s| {
            format!(
                "[{}] {} ({}): order {} units. Current: {} • {}",
                s.priority,
                s.product.name,
                s.product.sku,
                s.suggested_quantity,
                s.product.stock_level,
                s.days_until_stock_out
            )
        })
        .collect();

    if suggestions.len() > limit {
        lines.push(format!(
            "Showing top {} suggestions • {} more products need attention",
            limit,
            suggestions.len() - limit
        ));
    }
    lines
}

pub fn stats_line(stats: &DashboardStats) -> String {
    format!(
        "{} products, {} low on stock, {} pending orders, today's revenue {:.2}, inventory value {:.2}",
        stats.total_products,
        stats.low_stock_count,
        stats.pending_orders_count,
        stats.todays_revenue,
        stats.total_inventory_value
    )
}
