use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::enums::OrderStatus;

/// Order read-model used by the analytics core.
///
/// Orders are owned and mutated by the order placement subsystem; analytics
/// only ever reads a snapshot of them for one seller and one date window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// None for guest checkouts
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub seller_id: String,
    pub subtotal: f64,
    pub discount: f64,
    pub shipping_fee: f64,
    pub tax: f64,
    /// subtotal - discount + shipping_fee + tax (assumed, not re-checked here)
    pub final_total: f64,
    pub status: OrderStatus,
    pub payment_method: String,
    pub created_at: NaiveDateTime,
    pub items: Vec<OrderItem>,
}

/// Single order line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    /// None when the product or its category has been removed
    pub category_name: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
}
