use serde::{Deserialize, Serialize};

/// Money owed for an order, or the sum over all orders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalPrice {
    #[serde(rename = "total-sales")]
    pub total_sales: f64,
}

/// The best-selling product and how many units of it were ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularItem {
    #[serde(rename = "item-name")]
    pub item_name: String,
    pub quantity_of_sales: u64,
}
