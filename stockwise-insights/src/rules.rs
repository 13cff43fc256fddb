use crate::models::{Priority, ReorderSuggestion, StockOutProjection};
use std::cmp::Ordering;
use stockwise_store::app_config::ReorderConfig;

/// Every suggested order covers at least this many multiples of the low-stock floor
pub const MIN_ORDER_MULTIPLIER: u32 = 2;

/// Days of stock left at the current velocity
pub fn project_stock_out(stock_level: u32, velocity: f64) -> StockOutProjection {
    if velocity > 0.0 {
        StockOutProjection::Days(f64::from(stock_level) / velocity)
    } else {
        StockOutProjection::Never
    }
}

pub fn should_reorder(
    stock_level: u32,
    low_stock_threshold: u32,
    projection: StockOutProjection,
    config: &ReorderConfig,
) -> bool {
    stock_level <= low_stock_threshold || projection.is_within(config.reorder_horizon_days)
}

/// Enough units to cover `coverage_days` of demand, never below twice the
/// low-stock threshold
pub fn suggested_quantity(velocity: f64, low_stock_threshold: u32, config: &ReorderConfig) -> u32 {
    let base = (velocity * config.coverage_days).ceil();
    let base = if base.is_finite() && base > 0.0 {
        base.min(f64::from(u32::MAX)) as u32
    } else {
        0
    };
    let minimum = low_stock_threshold.saturating_mul(MIN_ORDER_MULTIPLIER);
    base.max(minimum)
}

/// First matching rule wins
pub fn classify_priority(
    stock_level: u32,
    projection: StockOutProjection,
    config: &ReorderConfig,
) -> Priority {
    if stock_level == 0 || projection.is_within(config.urgent_horizon_days) {
        Priority::High
    } else if projection.is_within(config.reorder_horizon_days) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Higher priority first, then soonest stock-out
pub fn compare_suggestions(a: &ReorderSuggestion, b: &ReorderSuggestion) -> Ordering {
    b.priority
        .rank()
        .cmp(&a.priority.rank())
        .then_with(|| a.days_until_stock_out.cmp(&b.days_until_stock_out))
}

/// Stable sort; exact ties keep their incoming order
pub fn rank_suggestions(suggestions: &mut [ReorderSuggestion]) {
    suggestions.sort_by(compare_suggestions);
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockwise_catalog::Product;

    fn config() -> ReorderConfig {
        ReorderConfig::default()
    }

    fn suggestion(id: u32, priority: Priority, days: StockOutProjection) -> ReorderSuggestion {
        ReorderSuggestion {
            product: Product {
                id,
                name: format!("Product {}", id),
                sku: format!("SKU-{}", id),
                price: 1.0,
                stock_level: 1,
                low_stock_threshold: 1,
                category: String::new(),
                supplier: String::new(),
            },
            velocity: 1.0,
            days_until_stock_out: days,
            suggested_quantity: 2,
            priority,
            sales_count: 1,
            total_quantity_sold: 1,
            last_sale_date: None,
        }
    }

    #[test]
    fn test_project_stock_out() {
        assert_eq!(project_stock_out(5, 1.0), StockOutProjection::Days(5.0));
        assert_eq!(project_stock_out(0, 2.0), StockOutProjection::Days(0.0));
        assert_eq!(project_stock_out(5, 0.0), StockOutProjection::Never);
    }

    #[test]
    fn test_should_reorder() {
        let config = config();

        // Stock above the floor, plenty of runway
        assert!(!should_reorder(100, 5, StockOutProjection::Days(1000.0), &config));
        // At the floor
        assert!(should_reorder(5, 5, StockOutProjection::Days(1000.0), &config));
        // Runway exactly at the horizon
        assert!(should_reorder(100, 5, StockOutProjection::Days(14.0), &config));
        // No velocity: only the floor decides
        assert!(!should_reorder(6, 5, StockOutProjection::Never, &config));
        assert!(should_reorder(4, 5, StockOutProjection::Never, &config));
    }

    #[test]
    fn test_suggested_quantity_floor() {
        let config = config();

        assert_eq!(suggested_quantity(1.0, 10, &config), 35);
        assert_eq!(suggested_quantity(1.0 / 30.0, 5, &config), 10);
        assert_eq!(suggested_quantity(0.0, 0, &config), 0);
        assert_eq!(suggested_quantity(0.1, 0, &config), 4);
    }

    #[test]
    fn test_classify_priority_order() {
        let config = config();

        // Zero stock wins over a distant projection
        assert_eq!(classify_priority(0, StockOutProjection::Days(0.0), &config), Priority::High);
        assert_eq!(classify_priority(0, StockOutProjection::Never, &config), Priority::High);
        assert_eq!(classify_priority(5, StockOutProjection::Days(7.0), &config), Priority::High);
        assert_eq!(classify_priority(5, StockOutProjection::Days(7.5), &config), Priority::Medium);
        assert_eq!(classify_priority(5, StockOutProjection::Days(14.0), &config), Priority::Medium);
        assert_eq!(classify_priority(5, StockOutProjection::Days(14.1), &config), Priority::Low);
        assert_eq!(classify_priority(5, StockOutProjection::Never, &config), Priority::Low);
    }

    #[test]
    fn test_rank_suggestions() {
        let mut suggestions = vec![
            suggestion(1, Priority::Low, StockOutProjection::Never),
            suggestion(2, Priority::Medium, StockOutProjection::Days(10.0)),
            suggestion(3, Priority::High, StockOutProjection::Days(6.0)),
            suggestion(4, Priority::Medium, StockOutProjection::Days(10.0)),
            suggestion(5, Priority::High, StockOutProjection::Days(2.0)),
            suggestion(6, Priority::Low, StockOutProjection::Days(20.0)),
        ];

        rank_suggestions(&mut suggestions);

        let order: Vec<u32> = suggestions.iter().map(|s| s.product.id).collect();
        assert_eq!(order, vec![5, 3, 2, 4, 6, 1]);
    }
}
