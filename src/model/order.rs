use super::require_non_empty;
use crate::error::ServiceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `created_at` layout, e.g. `2024-01-02 03:04:05`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Closed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Open => f.write_str("open"),
            OrderStatus::Closed => f.write_str("closed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
}

/// A customer order.
///
/// Created `open` with a server-assigned `order<N>` ID. While open, items can only be
/// appended. Once closed it can be neither updated, closed again nor deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "order_id")]
    pub id: String,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: String,
}

impl Order {
    pub fn is_closed(&self) -> bool {
        self.status == OrderStatus::Closed
    }
}

/// Numeric suffix of an `order<N>` ID, where `N` is a positive integer without
/// leading zeros. Anything else yields `None`.
pub fn order_number(id: &str) -> Option<u64> {
    let digits = id.strip_prefix("order")?;
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Body of both order creation and order update.
///
/// On update, `customer_name` replaces the stored one and `items` are appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_name: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl OrderRequest {
    pub fn new(customer_name: impl Into<String>, items: Vec<OrderItem>) -> Self {
        Self {
            customer_name: customer_name.into(),
            items,
        }
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        require_non_empty("customer_name", &self.customer_name)?;
        for item in &self.items {
            require_non_empty("product_id", &item.product_id)?;
            if item.quantity == 0 {
                return Err(ServiceError::invalid(format!(
                    "quantity of {} must be positive",
                    item.product_id
                )));
            }
        }
        Ok(())
    }
}
