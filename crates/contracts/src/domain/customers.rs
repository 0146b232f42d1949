use serde::{Deserialize, Serialize};

/// Default-address province of one customer appearing in an order slice.
/// Province is None when the customer has no default address on file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProvince {
    pub customer_id: String,
    pub province: Option<String>,
}
