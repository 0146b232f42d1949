use serde::{Deserialize, Serialize};

/// Product read-model for stock and best-seller views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub seller_id: String,
    pub name: String,
    pub category_name: Option<String>,
    pub price: f64,
    /// On-hand quantity; zero or negative values are a bug signal upstream
    /// but must still be reported, not rejected.
    pub quantity: i64,
    /// All-time sold counter maintained by the order subsystem
    pub total_sold: i64,
}

/// Seller storefront record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seller {
    pub id: String,
    /// Owning platform user
    pub user_id: String,
    pub shop_name: String,
}
