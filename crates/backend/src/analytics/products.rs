use contracts::dashboards::d410_seller_overview::{LowStockEntry, TopProductEntry};
use contracts::domain::catalog::Product;
use contracts::domain::orders::Order;
use std::collections::HashMap;

use super::change::percent_change;

/// Top products by order-item revenue in the window, with a trend against
/// the comparison window. When the window has no sales at all the seller's
/// all-time best sellers stand in, so the list is never empty for a
/// storefront that has sold anything.
pub fn top_products(
    orders: &[Order],
    previous_orders: &[Order],
    products: &[Product],
    limit: usize,
) -> Vec<TopProductEntry> {
    let current = revenue_by_product(orders);
    if current.is_empty() {
        return best_seller_fallback(products, limit);
    }
    let previous = revenue_by_product(previous_orders);

    let mut entries: Vec<TopProductEntry> = current
        .into_iter()
        .map(|(product_id, (name, revenue, quantity))| {
            let prior = previous
                .get(product_id.as_str())
                .map(|(_, r, _)| *r)
                .unwrap_or(0.0);
            TopProductEntry {
                product_id,
                name,
                revenue,
                quantity,
                trend_percent: percent_change(revenue, prior),
            }
        })
        .collect();
    entries.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    entries.truncate(limit);
    entries
}

fn revenue_by_product(orders: &[Order]) -> HashMap<String, (String, f64, i64)> {
    let mut by_product: HashMap<String, (String, f64, i64)> = HashMap::new();
    for order in orders {
        for item in &order.items {
            let entry = by_product
                .entry(item.product_id.clone())
                .or_insert_with(|| (item.product_name.clone(), 0.0, 0));
            entry.1 += item.line_total;
            entry.2 += item.quantity;
        }
    }
    by_product
}

/// Placeholder list when nothing sold in-window: lifetime best sellers by
/// the total_sold counter, with lifetime revenue estimated from the
/// current price.
fn best_seller_fallback(products: &[Product], limit: usize) -> Vec<TopProductEntry> {
    let mut sellers: Vec<&Product> = products.iter().filter(|p| p.total_sold > 0).collect();
    sellers.sort_by(|a, b| b.total_sold.cmp(&a.total_sold).then_with(|| a.id.cmp(&b.id)));
    sellers
        .into_iter()
        .take(limit)
        .map(|p| TopProductEntry {
            product_id: p.id.clone(),
            name: p.name.clone(),
            revenue: p.price * p.total_sold as f64,
            quantity: p.total_sold,
            trend_percent: 0.0,
        })
        .collect()
}

/// Products under the dashboard threshold, lowest stock first
pub fn low_stock_below(products: &[Product], threshold: i64) -> Vec<LowStockEntry> {
    let mut low: Vec<&Product> = products.iter().filter(|p| p.quantity < threshold).collect();
    low.sort_by(|a, b| a.quantity.cmp(&b.quantity).then_with(|| a.id.cmp(&b.id)));
    low.into_iter().map(low_stock_entry).collect()
}

/// The `limit` lowest-stock products regardless of threshold
/// (analytics view)
pub fn lowest_stock(products: &[Product], limit: usize) -> Vec<LowStockEntry> {
    let mut all: Vec<&Product> = products.iter().collect();
    all.sort_by(|a, b| a.quantity.cmp(&b.quantity).then_with(|| a.id.cmp(&b.id)));
    all.into_iter().take(limit).map(low_stock_entry).collect()
}

fn low_stock_entry(product: &Product) -> LowStockEntry {
    LowStockEntry {
        product_id: product.id.clone(),
        name: product.name.clone(),
        quantity: product.quantity,
        status: stock_status(product.quantity).to_string(),
    }
}

fn stock_status(quantity: i64) -> &'static str {
    if quantity <= 0 {
        "critical"
    } else if quantity <= 5 {
        "danger"
    } else {
        "warning"
    }
}
