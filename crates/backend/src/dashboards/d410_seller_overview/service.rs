use anyhow::Result;
use contracts::dashboards::d410_seller_overview::{
    OverviewBlock, SellerOverviewRequest, SellerOverviewResponse,
};
use contracts::shared::period::ResolvedPeriod;

use crate::analytics::{change, customers, products, sales, traffic};
use crate::shared::config;
use crate::shared::data::read_model;

/// Assemble the live seller dashboard for one resolved window.
///
/// Returns None when the user owns no storefront; nothing is fetched or
/// aggregated in that case. All metrics are computed from a single
/// two-window snapshot read.
pub async fn get_seller_overview(
    request: SellerOverviewRequest,
) -> Result<Option<SellerOverviewResponse>> {
    let seller = match read_model::find_seller_by_user(&request.user_id).await? {
        Some(seller) => seller,
        None => return Ok(None),
    };

    let period = ResolvedPeriod::resolve(
        request.period.as_deref(),
        request.start_date,
        request.end_date,
    );
    let analytics = &config::get().analytics;

    let orders =
        read_model::orders_in_window(&seller.id, &period.start_bound(), &period.end_bound())
            .await?;
    let previous_orders = read_model::orders_in_window(
        &seller.id,
        &period.previous_start_bound(),
        &period.previous_end_bound(),
    )
    .await?;
    let product_list = read_model::products_for_seller(&seller.id).await?;
    let provinces =
        read_model::customer_provinces(&seller.id, &period.start_bound(), &period.end_bound())
            .await?;

    let overview = build_overview(&orders, &previous_orders);
    let response = SellerOverviewResponse {
        revenue_series: sales::revenue_series(
            &orders,
            period.start,
            period.end,
            analytics.profit_margin,
        ),
        category_revenue: sales::category_revenue(&orders),
        customer_segments: customers::segment_customers(&orders),
        customer_geography: customers::customer_geography(
            &orders,
            &provinces,
            analytics.geography_limit,
        ),
        top_products: products::top_products(
            &orders,
            &previous_orders,
            &product_list,
            analytics.top_limit,
        ),
        low_stock: products::low_stock_below(&product_list, analytics.low_stock_threshold),
        traffic_series: traffic::traffic_series(&orders, period.start, period.end),
        traffic_sources: traffic::traffic_sources(&orders),
        seller_id: seller.id,
        shop_name: seller.shop_name,
        period,
        overview,
    };

    Ok(Some(response))
}

/// Headline block with period-over-period deltas. Gross revenue here:
/// cancelled orders stay in the sum (their totals are zeroed upstream).
fn build_overview(
    orders: &[contracts::domain::orders::Order],
    previous_orders: &[contracts::domain::orders::Order],
) -> OverviewBlock {
    let revenue = sales::total_revenue(orders);
    let order_count = orders.len() as u64;
    let unique_customers = sales::unique_customers(orders);
    let average_order_value = sales::average_order_value(revenue, order_count);
    let conversion_rate = sales::conversion_rate(order_count, unique_customers);

    let prev_revenue = sales::total_revenue(previous_orders);
    let prev_order_count = previous_orders.len() as u64;
    let prev_unique = sales::unique_customers(previous_orders);
    let prev_aov = sales::average_order_value(prev_revenue, prev_order_count);
    let prev_conversion = sales::conversion_rate(prev_order_count, prev_unique);

    OverviewBlock {
        revenue,
        revenue_change: change::percent_change(revenue, prev_revenue),
        order_count,
        orders_change: change::percent_change(order_count as f64, prev_order_count as f64),
        unique_customers,
        average_order_value,
        aov_change: change::percent_change(average_order_value, prev_aov),
        conversion_rate,
        conversion_change: change::percent_change(conversion_rate, prev_conversion),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use contracts::domain::orders::Order;
    use contracts::enums::OrderStatus;

    fn order(id: &str, customer: &str, total: f64, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            customer_id: Some(customer.to_string()),
            customer_name: None,
            seller_id: "s1".to_string(),
            subtotal: total,
            discount: 0.0,
            shipping_fee: 0.0,
            tax: 0.0,
            final_total: total,
            status,
            payment_method: "cod".to_string(),
            created_at: NaiveDateTime::parse_from_str("2025-06-01 08:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            items: vec![],
        }
    }

    #[test]
    fn overview_scenario_with_cancelled_order() {
        // current window: 100 + 200 + 0 (cancelled), previous: 100 + 100
        let current = vec![
            order("o1", "c1", 100.0, OrderStatus::Delivered),
            order("o2", "c2", 200.0, OrderStatus::Delivered),
            order("o3", "c3", 0.0, OrderStatus::Cancelled),
        ];
        let previous = vec![
            order("p1", "c1", 100.0, OrderStatus::Delivered),
            order("p2", "c4", 100.0, OrderStatus::Delivered),
        ];

        let block = build_overview(&current, &previous);
        assert_eq!(block.revenue, 300.0);
        assert_eq!(block.revenue_change, 50.0);
        assert_eq!(block.order_count, 3);
        assert_eq!(block.orders_change, 50.0);
        assert_eq!(block.unique_customers, 3);
    }

    #[test]
    fn overview_is_all_zeros_for_empty_windows() {
        let block = build_overview(&[], &[]);
        assert_eq!(block.revenue, 0.0);
        assert_eq!(block.revenue_change, 0.0);
        assert_eq!(block.order_count, 0);
        assert_eq!(block.average_order_value, 0.0);
        assert_eq!(block.conversion_rate, 0.0);
        assert_eq!(block.conversion_change, 0.0);
    }
}
