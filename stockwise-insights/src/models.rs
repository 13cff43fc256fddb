use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;
use stockwise_catalog::Product;
use stockwise_order::PurchaseOrderItem;

/// Urgency of a reorder suggestion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Higher rank sorts first
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.write_str(label)
    }
}

/// Projected days until on-hand stock reaches zero.
///
/// `Never` applies when nothing is selling; it orders after every finite
/// projection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockOutProjection {
    Days(f64),
    Never,
}

impl StockOutProjection {
    pub fn days(self) -> Option<f64> {
        match self {
            StockOutProjection::Days(days) => Some(days),
            StockOutProjection::Never => None,
        }
    }

    /// Stock runs out within `horizon` days (inclusive)
    pub fn is_within(self, horizon: f64) -> bool {
        matches!(self, StockOutProjection::Days(days) if days <= horizon)
    }
}

impl Ord for StockOutProjection {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (StockOutProjection::Days(a), StockOutProjection::Days(b)) => a.total_cmp(b),
            (StockOutProjection::Days(_), StockOutProjection::Never) => Ordering::Less,
            (StockOutProjection::Never, StockOutProjection::Days(_)) => Ordering::Greater,
            (StockOutProjection::Never, StockOutProjection::Never) => Ordering::Equal,
        }
    }
}

impl PartialOrd for StockOutProjection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for StockOutProjection {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for StockOutProjection {}

impl fmt::Display for StockOutProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            StockOutProjection::Never => f.write_str("N/A"),
            StockOutProjection::Days(days) if days <= 0.0 => f.write_str("Out of stock"),
            StockOutProjection::Days(days) if days < 1.0 => f.write_str("Today"),
            StockOutProjection::Days(days) => write!(f, "{} days", days.ceil()),
        }
    }
}

/// Per-product sales aggregate over one analysis window
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityRecord<'a> {
    pub product: &'a Product,
    pub total_quantity_sold: u64,
    pub sales_count: u32,
    pub last_sale_date: Option<DateTime<Utc>>,
    pub average_daily_velocity: f64,
}

impl<'a> VelocityRecord<'a> {
    pub fn new(product: &'a Product) -> Self {
        Self {
            product,
            total_quantity_sold: 0,
            sales_count: 0,
            last_sale_date: None,
            average_daily_velocity: 0.0,
        }
    }
}

/// A product that should be reordered, and how much of it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReorderSuggestion {
    pub product: Product,
    /// Units sold per day over the analysis window
    pub velocity: f64,
    pub days_until_stock_out: StockOutProjection,
    pub suggested_quantity: u32,
    pub priority: Priority,
    pub sales_count: u32,
    pub total_quantity_sold: u64,
    pub last_sale_date: Option<DateTime<Utc>>,
}

impl ReorderSuggestion {
    /// Purchase order line covering this suggestion at catalog price
    pub fn to_order_item(&self) -> PurchaseOrderItem {
        PurchaseOrderItem {
            product_id: self.product.id,
            product_name: self.product.name.clone(),
            quantity: self.suggested_quantity,
            unit_price: self.product.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_sorts_after_any_finite_projection() {
        let mut projections = vec![
            StockOutProjection::Never,
            StockOutProjection::Days(f64::MAX),
            StockOutProjection::Days(0.0),
            StockOutProjection::Days(12.5),
        ];
        projections.sort();

        assert_eq!(
            projections,
            vec![
                StockOutProjection::Days(0.0),
                StockOutProjection::Days(12.5),
                StockOutProjection::Days(f64::MAX),
                StockOutProjection::Never,
            ]
        );
        assert!(!StockOutProjection::Never.is_within(f64::INFINITY));
        assert!(StockOutProjection::Days(14.0).is_within(14.0));
    }

    #[test]
    fn test_projection_display() {
        assert_eq!(StockOutProjection::Never.to_string(), "N/A");
        assert_eq!(StockOutProjection::Days(0.0).to_string(), "Out of stock");
        assert_eq!(StockOutProjection::Days(0.4).to_string(), "Today");
        assert_eq!(StockOutProjection::Days(4.2).to_string(), "5 days");
        assert_eq!(StockOutProjection::Days(10.0).to_string(), "10 days");
    }

    #[test]
    fn test_projection_wire_format() {
        let never = serde_json::to_value(StockOutProjection::Never).unwrap();
        assert_eq!(never, serde_json::json!("never"));

        let days = serde_json::to_value(StockOutProjection::Days(2.5)).unwrap();
        assert_eq!(days, serde_json::json!({ "days": 2.5 }));
    }

    #[test]
    fn test_priority_rank() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
        assert_eq!(Priority::Medium.to_string(), "medium");
    }
}
