use chrono::{Duration, NaiveDate};
use contracts::dashboards::d410_seller_overview::{TrafficPoint, TrafficSource};
use contracts::domain::orders::Order;
use std::collections::{HashMap, HashSet};

/// Synthetic per-day traffic derived from order activity. No visitor
/// tracking exists, so: visitors = 2 x distinct buyers (min 1), views =
/// 3 x visitors, bounce rate drops with order volume down to a 25% floor.
/// Placeholder numbers, kept only for dashboard parity.
pub fn traffic_series(orders: &[Order], start: NaiveDate, end: NaiveDate) -> Vec<TrafficPoint> {
    let mut buyers_by_day: HashMap<NaiveDate, HashSet<&str>> = HashMap::new();
    let mut orders_by_day: HashMap<NaiveDate, u64> = HashMap::new();
    for order in orders {
        let day = order.created_at.date();
        *orders_by_day.entry(day).or_insert(0) += 1;
        if let Some(customer_id) = order.customer_id.as_deref() {
            buyers_by_day.entry(day).or_default().insert(customer_id);
        }
    }

    let mut series = Vec::new();
    let mut day = start;
    while day <= end {
        let buyers = buyers_by_day.get(&day).map(|s| s.len() as u64).unwrap_or(0);
        let order_count = orders_by_day.get(&day).copied().unwrap_or(0);
        let visitors = (buyers * 2).max(1);
        series.push(TrafficPoint {
            date: day,
            visitors,
            views: visitors * 3,
            bounce_rate: (70.0 - order_count as f64 * 2.0).max(25.0),
        });
        day += Duration::days(1);
    }
    series
}

/// Order counts per payment method, standing in for traffic sources
pub fn traffic_sources(orders: &[Order]) -> Vec<TrafficSource> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for order in orders {
        *counts.entry(order.payment_method.as_str()).or_insert(0) += 1;
    }

    let mut sources: Vec<TrafficSource> = counts
        .into_iter()
        .map(|(source, orders)| TrafficSource {
            source: source.to_string(),
            orders,
        })
        .collect();
    sources.sort_by(|a, b| b.orders.cmp(&a.orders).then_with(|| a.source.cmp(&b.source)));
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use contracts::enums::OrderStatus;

    fn order(id: &str, customer: Option<&str>, method: &str, created: &str) -> Order {
        Order {
            id: id.to_string(),
            customer_id: customer.map(str::to_string),
            customer_name: None,
            seller_id: "s1".to_string(),
            subtotal: 0.0,
            discount: 0.0,
            shipping_fee: 0.0,
            tax: 0.0,
            final_total: 0.0,
            status: OrderStatus::Confirmed,
            payment_method: method.to_string(),
            created_at: NaiveDateTime::parse_from_str(created, "%Y-%m-%d %H:%M:%S").unwrap(),
            items: vec![],
        }
    }

    #[test]
    fn quiet_days_get_the_visitor_floor() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        let series = traffic_series(&[], start, end);
        assert_eq!(series.len(), 3);
        for point in &series {
            assert_eq!(point.visitors, 1);
            assert_eq!(point.views, 3);
            assert_eq!(point.bounce_rate, 70.0);
        }
    }

    #[test]
    fn busy_days_scale_visitors_and_floor_bounce() {
        let mut orders = vec![
            order("o1", Some("c1"), "cod", "2025-06-01 08:00:00"),
            order("o2", Some("c2"), "cod", "2025-06-01 09:00:00"),
        ];
        for i in 0..30 {
            orders.push(order(
                &format!("x{}", i),
                Some("c1"),
                "cod",
                "2025-06-01 10:00:00",
            ));
        }
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let series = traffic_series(&orders, day, day);
        assert_eq!(series[0].visitors, 4);
        assert_eq!(series[0].views, 12);
        assert_eq!(series[0].bounce_rate, 25.0);
    }

    #[test]
    fn sources_are_payment_methods_counted() {
        let orders = vec![
            order("o1", Some("c1"), "cod", "2025-06-01 08:00:00"),
            order("o2", Some("c2"), "momo", "2025-06-01 09:00:00"),
            order("o3", Some("c3"), "cod", "2025-06-01 10:00:00"),
        ];
        let sources = traffic_sources(&orders);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].source, "cod");
        assert_eq!(sources[0].orders, 2);
    }
}
