use crate::models::VelocityRecord;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use stockwise_catalog::{Product, ProductId};
use stockwise_sales::Sale;

/// Start of a trailing window of `days` ending at `now`
pub fn analysis_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now - Duration::days(i64::from(days))
}

/// Sales strictly after `start`; a sale exactly on the boundary is left out
pub fn filter_window(sales: &[Sale], start: DateTime<Utc>) -> Vec<&Sale> {
    sales.iter().filter(|sale| sale.timestamp > start).collect()
}

/// Aggregate sold quantities per product.
///
/// Returns one record per product id, in catalog order. Items for products
/// missing from the catalog are skipped; the number skipped is returned
/// alongside the records.
pub fn compute_velocity<'a>(
    products: &'a [Product],
    sales: &[&Sale],
    days: u32,
) -> (Vec<VelocityRecord<'a>>, usize) {
    let mut records: Vec<VelocityRecord<'a>> = Vec::with_capacity(products.len());
    let mut index: HashMap<ProductId, usize> = HashMap::with_capacity(products.len());

    for product in products {
        index.entry(product.id).or_insert_with(|| {
            records.push(VelocityRecord::new(product));
            records.len() - 1
        });
    }

    let mut skipped = 0;
    for sale in sales {
        for item in &sale.items {
            let Some(&slot) = index.get(&item.product_id) else {
                skipped += 1;
                continue;
            };
            let record = &mut records[slot];
            record.total_quantity_sold += u64::from(item.quantity);
            record.sales_count += 1;
            if record.last_sale_date.map_or(true, |last| sale.timestamp > last) {
                record.last_sale_date = Some(sale.timestamp);
            }
        }
    }

    for record in &mut records {
        record.average_daily_velocity = daily_velocity(record.total_quantity_sold, days);
    }

    (records, skipped)
}

/// Units per day; zero for an empty window
pub fn daily_velocity(total_quantity_sold: u64, days: u32) -> f64 {
    if days == 0 {
        return 0.0;
    }
    total_quantity_sold as f64 / f64::from(days)
}
