use contracts::dashboards::d410_seller_overview::{ProvinceCount, SegmentCount};
use contracts::domain::customers::CustomerProvince;
use contracts::domain::orders::Order;
use contracts::reports::r510_seller_report::TopCustomerEntry;
use std::collections::HashMap;

use super::OTHER_BUCKET;

/// New-vs-returning split: a customer who placed more than one order in
/// the window counts as returning. Guest orders are excluded.
pub fn segment_customers(orders: &[Order]) -> Vec<SegmentCount> {
    let mut orders_per_customer: HashMap<&str, u64> = HashMap::new();
    for order in orders {
        if let Some(customer_id) = order.customer_id.as_deref() {
            *orders_per_customer.entry(customer_id).or_insert(0) += 1;
        }
    }

    let returning = orders_per_customer.values().filter(|&&n| n > 1).count() as u64;
    let new = orders_per_customer.len() as u64 - returning;

    vec![
        SegmentCount {
            segment: "new".to_string(),
            customers: new,
        },
        SegmentCount {
            segment: "returning".to_string(),
            customers: returning,
        },
    ]
}

/// Province distribution of the distinct customers in the slice, top
/// `limit` by count. Customers without a default address go to "Khác".
pub fn customer_geography(
    orders: &[Order],
    provinces: &[CustomerProvince],
    limit: usize,
) -> Vec<ProvinceCount> {
    let province_by_customer: HashMap<&str, Option<&str>> = provinces
        .iter()
        .map(|p| (p.customer_id.as_str(), p.province.as_deref()))
        .collect();

    let mut seen: Vec<&str> = orders
        .iter()
        .filter_map(|o| o.customer_id.as_deref())
        .collect();
    seen.sort_unstable();
    seen.dedup();

    let mut counts: HashMap<String, u64> = HashMap::new();
    for customer_id in seen {
        let province = province_by_customer
            .get(customer_id)
            .copied()
            .flatten()
            .filter(|p| !p.is_empty())
            .unwrap_or(OTHER_BUCKET);
        *counts.entry(province.to_string()).or_insert(0) += 1;
    }

    let mut distribution: Vec<ProvinceCount> = counts
        .into_iter()
        .map(|(province, customers)| ProvinceCount {
            province,
            customers,
        })
        .collect();
    distribution.sort_by(|a, b| {
        b.customers
            .cmp(&a.customers)
            .then_with(|| a.province.cmp(&b.province))
    });
    distribution.truncate(limit);
    distribution
}

/// Top customers by total spend over the window (export section)
pub fn top_customers(orders: &[Order], limit: usize) -> Vec<TopCustomerEntry> {
    let mut by_customer: HashMap<&str, (Option<&str>, u64, f64)> = HashMap::new();
    for order in orders {
        if let Some(customer_id) = order.customer_id.as_deref() {
            let entry = by_customer.entry(customer_id).or_insert((None, 0, 0.0));
            if entry.0.is_none() {
                entry.0 = order.customer_name.as_deref();
            }
            entry.1 += 1;
            entry.2 += order.final_total;
        }
    }

    let mut top: Vec<TopCustomerEntry> = by_customer
        .into_iter()
        .map(|(customer_id, (name, orders, total_spent))| TopCustomerEntry {
            customer_id: customer_id.to_string(),
            name: name.unwrap_or(customer_id).to_string(),
            orders,
            total_spent,
        })
        .collect();
    top.sort_by(|a, b| {
        b.total_spent
            .partial_cmp(&a.total_spent)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    });
    top.truncate(limit);
    top
}
