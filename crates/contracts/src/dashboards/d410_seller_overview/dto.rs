use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::period::ResolvedPeriod;

/// Request for the live seller dashboard.
///
/// `period` accepts "7days" | "30days" | "90days" | "year"; anything else
/// (or nothing) resolves to 30 days. Explicit start/end dates override the
/// token entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerOverviewRequest {
    /// Platform user requesting their storefront dashboard
    pub user_id: String,
    pub period: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Full dashboard payload for one seller and one resolved window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerOverviewResponse {
    pub seller_id: String,
    pub shop_name: String,
    pub period: ResolvedPeriod,
    pub overview: OverviewBlock,
    pub revenue_series: Vec<RevenuePoint>,
    pub category_revenue: Vec<CategoryRevenue>,
    pub customer_segments: Vec<SegmentCount>,
    pub customer_geography: Vec<ProvinceCount>,
    pub top_products: Vec<TopProductEntry>,
    pub low_stock: Vec<LowStockEntry>,
    pub traffic_series: Vec<TrafficPoint>,
    pub traffic_sources: Vec<TrafficSource>,
}

/// Headline metrics with period-over-period change percentages.
/// Revenue here is gross: every order in the window counts regardless of
/// status (the downloadable report sums delivered orders only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewBlock {
    pub revenue: f64,
    pub revenue_change: f64,
    pub order_count: u64,
    pub orders_change: f64,
    pub unique_customers: u64,
    pub average_order_value: f64,
    pub aov_change: f64,
    /// Orders per distinct customer, as a percentage. An estimate only:
    /// there is no visitor tracking behind it.
    pub conversion_rate: f64,
    pub conversion_change: f64,
}

/// One day of the revenue series. Every calendar day of the window is
/// present, including zero-order days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub revenue: f64,
    /// revenue x assumed margin, not a real costing figure
    pub profit: f64,
    pub order_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: f64,
}

/// New-vs-returning split of the customers seen in the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentCount {
    pub segment: String,
    pub customers: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvinceCount {
    pub province: String,
    pub customers: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProductEntry {
    pub product_id: String,
    pub name: String,
    pub revenue: f64,
    pub quantity: i64,
    /// Revenue change vs the comparison window
    pub trend_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockEntry {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    /// "critical" (<= 0) | "danger" (<= 5) | "warning"
    pub status: String,
}

/// Synthetic traffic estimate derived from order counts; placeholder until
/// real visitor tracking exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficPoint {
    pub date: NaiveDate,
    pub visitors: u64,
    pub views: u64,
    pub bounce_rate: f64,
}

/// Order counts per payment method, standing in for acquisition channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSource {
    pub source: String,
    pub orders: u64,
}
