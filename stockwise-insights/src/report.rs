use chrono::{DateTime, Duration, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use stockwise_catalog::{Product, ProductId};
use stockwise_sales::Sale;

/// How many products the top-sellers table keeps
pub const TOP_PRODUCTS: usize = 10;

/// Reporting period presets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    Today,
    Week,
    Month,
    Custom {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl ReportPeriod {
    /// Concrete `(start, end)` for a period ending at `now`
    pub fn range(self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        match self {
            ReportPeriod::Today => {
                let start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
                (start, start + Duration::days(1) - Duration::milliseconds(1))
            }
            ReportPeriod::Week => (now - Duration::weeks(1), now),
            ReportPeriod::Month => {
                let start = now.checked_sub_months(Months::new(1)).unwrap_or(now - Duration::days(30));
                (start, now)
            }
            ReportPeriod::Custom { start, end } => (start, end),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSales {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity_sold: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyBreakdown {
    pub date: NaiveDate,
    pub revenue: f64,
    pub transactions: usize,
}

/// Sales and stock metrics for a date range
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesReport {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_revenue: f64,
    pub total_transactions: usize,
    pub total_items_sold: u64,
    pub average_sale: f64,
    pub top_products: Vec<ProductSales>,
    pub daily_breakdown: Vec<DailyBreakdown>,
    pub low_stock_count: usize,
    pub total_inventory_value: f64,
    pub total_products: usize,
}

impl SalesReport {
    /// Build a report over sales with `start <= timestamp <= end`
    pub fn build(sales: &[Sale], products: &[Product], start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let in_range: Vec<&Sale> = sales
            .iter()
            .filter(|s| s.timestamp >= start && s.timestamp <= end)
            .collect();

        let total_revenue: f64 = in_range.iter().map(|s| s.total_amount).sum();
        let total_transactions = in_range.len();
        let total_items_sold: u64 = in_range.iter().map(|s| s.total_items()).sum();
        let average_sale = if total_transactions > 0 {
            total_revenue / total_transactions as f64
        } else {
            0.0
        };

        Self {
            start,
            end,
            total_revenue,
            total_transactions,
            total_items_sold,
            average_sale,
            top_products: top_products(&in_range, products),
            daily_breakdown: daily_breakdown(&in_range),
            low_stock_count: products.iter().filter(|p| p.is_low_stock()).count(),
            total_inventory_value: products.iter().map(Product::stock_value).sum(),
            total_products: products.len(),
        }
    }
}

fn top_products(sales: &[&Sale], products: &[Product]) -> Vec<ProductSales> {
    let mut totals: Vec<ProductSales> = Vec::new();
    let mut index: HashMap<ProductId, usize> = HashMap::new();

    for sale in sales {
        for item in &sale.items {
            let slot = *index.entry(item.product_id).or_insert_with(|| {
                let product_name = if item.product_name.is_empty() {
                    products
                        .iter()
                        .find(|p| p.id == item.product_id)
                        .map(|p| p.name.clone())
                        .unwrap_or_default()
                } else {
                    item.product_name.clone()
                };
                totals.push(ProductSales {
                    product_id: item.product_id,
                    product_name,
                    quantity_sold: 0,
                    revenue: 0.0,
                });
                totals.len() - 1
            });
            totals[slot].quantity_sold += u64::from(item.quantity);
            totals[slot].revenue += item.total_price;
        }
    }

    totals.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    totals.truncate(TOP_PRODUCTS);
    totals
}

fn daily_breakdown(sales: &[&Sale]) -> Vec<DailyBreakdown> {
    let mut days: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for sale in sales {
        let entry = days.entry(sale.timestamp.date_naive()).or_insert((0.0, 0));
        entry.0 += sale.total_amount;
        entry.1 += 1;
    }

    days.into_iter()
        .map(|(date, (revenue, transactions))| DailyBreakdown { date, revenue, transactions })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stockwise_sales::SaleItem;

    fn item(product_id: ProductId, quantity: u32, unit_price: f64) -> SaleItem {
        SaleItem {
            product_id,
            product_name: String::new(),
            quantity,
            unit_price,
            total_price: quantity as f64 * unit_price,
        }
    }

    fn sale(id: u32, timestamp: DateTime<Utc>, items: Vec<SaleItem>) -> Sale {
        Sale {
            id,
            timestamp,
            total_amount: items.iter().map(|i| i.total_price).sum(),
            items,
        }
    }

    fn product(id: ProductId, name: &str, price: f64, stock_level: u32) -> Product {
        Product {
            id,
            name: name.to_string(),
            sku: format!("SKU-{}", id),
            price,
            stock_level,
            low_stock_threshold: 5,
            category: String::new(),
            supplier: String::new(),
        }
    }

    #[test]
    fn test_report_metrics() {
        let day_one = Utc.with_ymd_and_hms(2026, 10, 10, 10, 0, 0).unwrap();
        let day_two = Utc.with_ymd_and_hms(2026, 10, 11, 15, 0, 0).unwrap();
        let outside = Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap();

        let products = vec![product(1, "Mug", 8.0, 10), product(2, "Tea", 4.0, 2)];
        let sales = vec![
            sale(1, day_one, vec![item(1, 2, 8.0), item(2, 1, 4.0)]),
            sale(2, day_two, vec![item(2, 5, 4.0)]),
            sale(3, outside, vec![item(1, 100, 8.0)]),
        ];

        let report = SalesReport::build(&sales, &products, day_one, day_two);

        assert_eq!(report.total_transactions, 2);
        assert_eq!(report.total_revenue, 40.0);
        assert_eq!(report.total_items_sold, 8);
        assert_eq!(report.average_sale, 20.0);
        assert_eq!(report.low_stock_count, 1);
        assert_eq!(report.total_inventory_value, 88.0);

        assert_eq!(report.top_products[0].product_name, "Tea");
        assert_eq!(report.top_products[0].revenue, 24.0);
        assert_eq!(report.top_products[1].quantity_sold, 2);

        assert_eq!(report.daily_breakdown.len(), 2);
        assert!(report.daily_breakdown[0].date < report.daily_breakdown[1].date);
    }

    #[test]
    fn test_empty_range() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
        let report = SalesReport::build(&[], &[], now - Duration::days(7), now);

        assert_eq!(report.average_sale, 0.0);
        assert!(report.top_products.is_empty());
    }

    #[test]
    fn test_period_ranges() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 13, 45, 0).unwrap();

        let (start, end) = ReportPeriod::Today.range(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap());
        assert_eq!(end.date_naive(), now.date_naive());

        let (start, _) = ReportPeriod::Month.range(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 9, 18, 13, 45, 0).unwrap());

        let (start, end) = ReportPeriod::Week.range(now);
        assert_eq!(end - start, Duration::days(7));
    }
}
