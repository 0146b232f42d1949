use chrono::{Duration, NaiveDate};
use contracts::dashboards::d410_seller_overview::{CategoryRevenue, RevenuePoint};
use contracts::domain::orders::Order;
use contracts::enums::OrderStatus;
use std::collections::HashMap;

use super::OTHER_BUCKET;

/// Gross revenue: every order in the slice counts, whatever its status.
/// This matches the dashboard semantics; the downloadable report uses
/// [`delivered_revenue`] instead.
pub fn total_revenue(orders: &[Order]) -> f64 {
    orders.iter().map(|o| o.final_total).sum()
}

/// Revenue over delivered orders only (seller-report semantics)
pub fn delivered_revenue(orders: &[Order]) -> f64 {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Delivered)
        .map(|o| o.final_total)
        .sum()
}

pub fn delivered_count(orders: &[Order]) -> u64 {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Delivered)
        .count() as u64
}

/// Distinct customers among orders that have one
pub fn unique_customers(orders: &[Order]) -> u64 {
    let mut seen: Vec<&str> = orders
        .iter()
        .filter_map(|o| o.customer_id.as_deref())
        .collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len() as u64
}

/// Revenue / order count, 0 for an empty slice
pub fn average_order_value(revenue: f64, order_count: u64) -> f64 {
    if order_count == 0 {
        0.0
    } else {
        revenue / order_count as f64
    }
}

/// Orders per distinct customer as a percentage, 0 when no customers.
/// An estimate only: there is no visitor funnel behind it.
pub fn conversion_rate(order_count: u64, unique_customers: u64) -> f64 {
    if unique_customers == 0 {
        0.0
    } else {
        order_count as f64 / unique_customers as f64 * 100.0
    }
}

/// Day-bucketed revenue series covering every calendar date of
/// `[start, end]` with no gaps; zero-order days emit zero points.
/// Profit is revenue times the assumed margin, not a costing figure.
pub fn revenue_series(
    orders: &[Order],
    start: NaiveDate,
    end: NaiveDate,
    profit_margin: f64,
) -> Vec<RevenuePoint> {
    let mut by_day: HashMap<NaiveDate, (f64, u64)> = HashMap::new();
    for order in orders {
        let entry = by_day.entry(order.created_at.date()).or_insert((0.0, 0));
        entry.0 += order.final_total;
        entry.1 += 1;
    }

    let mut series = Vec::new();
    let mut day = start;
    while day <= end {
        let (revenue, order_count) = by_day.get(&day).copied().unwrap_or((0.0, 0));
        series.push(RevenuePoint {
            date: day,
            revenue,
            profit: revenue * profit_margin,
            order_count,
        });
        day += Duration::days(1);
    }
    series
}

/// Order-item revenue grouped by product category, descending. Items whose
/// product or category is gone land in the "Khác" bucket, so the buckets
/// always reconcile with the item total.
pub fn category_revenue(orders: &[Order]) -> Vec<CategoryRevenue> {
    let mut by_category: HashMap<String, f64> = HashMap::new();
    for order in orders {
        for item in &order.items {
            let category = item
                .category_name
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| OTHER_BUCKET.to_string());
            *by_category.entry(category).or_insert(0.0) += item.line_total;
        }
    }

    let mut buckets: Vec<CategoryRevenue> = by_category
        .into_iter()
        .map(|(category, revenue)| CategoryRevenue { category, revenue })
        .collect();
    buckets.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use contracts::domain::orders::OrderItem;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn order(id: &str, customer: Option<&str>, total: f64, created: &str) -> Order {
        Order {
            id: id.to_string(),
            customer_id: customer.map(str::to_string),
            customer_name: customer.map(str::to_string),
            seller_id: "s1".to_string(),
            subtotal: total,
            discount: 0.0,
            shipping_fee: 0.0,
            tax: 0.0,
            final_total: total,
            status: OrderStatus::Confirmed,
            payment_method: "cod".to_string(),
            created_at: dt(created),
            items: vec![],
        }
    }

    fn item(category: Option<&str>, line_total: f64) -> OrderItem {
        OrderItem {
            product_id: "p1".to_string(),
            product_name: "Áo thun".to_string(),
            category_name: category.map(str::to_string),
            quantity: 1,
            unit_price: line_total,
            line_total,
        }
    }

    #[test]
    fn series_has_one_point_per_day_with_no_gaps() {
        let orders = vec![
            order("o1", Some("c1"), 100.0, "2025-06-02 09:00:00"),
            order("o2", Some("c2"), 200.0, "2025-06-02 15:00:00"),
            order("o3", Some("c1"), 50.0, "2025-06-05 10:00:00"),
        ];
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
        let series = revenue_series(&orders, start, end, 0.22);

        assert_eq!(series.len(), 7);
        for (i, point) in series.iter().enumerate() {
            assert_eq!(point.date, start + Duration::days(i as i64));
        }
        assert_eq!(series[1].revenue, 300.0);
        assert_eq!(series[1].order_count, 2);
        assert_eq!(series[1].profit, 300.0 * 0.22);
        assert_eq!(series[0].revenue, 0.0);
        assert_eq!(series[0].order_count, 0);
    }

    #[test]
    fn empty_window_is_all_zero_points() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let series = revenue_series(&[], start, end, 0.22);
        assert_eq!(series.len(), 30);
        assert!(series.iter().all(|p| p.revenue == 0.0 && p.order_count == 0));
    }

    #[test]
    fn zero_defaults_instead_of_division_errors() {
        assert_eq!(average_order_value(0.0, 0), 0.0);
        assert_eq!(conversion_rate(0, 0), 0.0);
        assert_eq!(average_order_value(300.0, 3), 100.0);
        assert_eq!(conversion_rate(3, 2), 150.0);
    }

    #[test]
    fn unique_customers_ignores_guest_orders() {
        let orders = vec![
            order("o1", Some("c1"), 10.0, "2025-06-01 08:00:00"),
            order("o2", Some("c1"), 10.0, "2025-06-01 09:00:00"),
            order("o3", None, 10.0, "2025-06-01 10:00:00"),
            order("o4", Some("c2"), 10.0, "2025-06-01 11:00:00"),
        ];
        assert_eq!(unique_customers(&orders), 2);
    }

    #[test]
    fn gross_vs_delivered_revenue() {
        let mut delivered = order("o1", Some("c1"), 100.0, "2025-06-01 08:00:00");
        delivered.status = OrderStatus::Delivered;
        let cancelled = Order {
            status: OrderStatus::Cancelled,
            ..order("o2", Some("c2"), 40.0, "2025-06-01 09:00:00")
        };
        let pending = order("o3", Some("c3"), 60.0, "2025-06-01 10:00:00");

        let orders = vec![delivered, cancelled, pending];
        assert_eq!(total_revenue(&orders), 200.0);
        assert_eq!(delivered_revenue(&orders), 100.0);
        assert_eq!(delivered_count(&orders), 1);
    }

    #[test]
    fn category_buckets_reconcile_with_item_total() {
        let mut o1 = order("o1", Some("c1"), 0.0, "2025-06-01 08:00:00");
        o1.items = vec![item(Some("Thời trang"), 120.0), item(None, 30.0)];
        let mut o2 = order("o2", Some("c2"), 0.0, "2025-06-01 09:00:00");
        o2.items = vec![item(Some("Thời trang"), 80.0), item(Some(""), 20.0)];

        let buckets = category_revenue(&[o1, o2]);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].category, "Thời trang");
        assert_eq!(buckets[0].revenue, 200.0);
        assert_eq!(buckets[1].category, OTHER_BUCKET);
        assert_eq!(buckets[1].revenue, 50.0);

        let total: f64 = buckets.iter().map(|b| b.revenue).sum();
        assert_eq!(total, 250.0);
    }
}
