//! Pure aggregation functions over order/product slices already fetched
//! for one seller and one resolved window. Nothing in here touches the
//! database or holds state between requests.

pub mod change;
pub mod customers;
pub mod products;
pub mod sales;
pub mod traffic;

/// Bucket label for rows that cannot be attributed (missing category,
/// customer without a default address, ...)
pub const OTHER_BUCKET: &str = "Khác";
