use super::{require_non_empty, resolve_id};
use crate::error::ServiceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An ingredient held in stock.
///
/// # Actor Framework
/// Managed by a [`ResourceActor`](crate::framework::ResourceActor); see
/// [`crate::inventory_actor`] for the hooks, the `CheckStock` action and the
/// `Reserve`/`Release` commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(rename = "ingredient_id")]
    pub id: String,
    pub name: String,
    pub unit: String,
    pub quantity: f64,
}

/// Aggregated ingredient needs, keyed by ingredient ID.
///
/// Ordered so that stock checks report the same failing ingredient every time.
pub type Requirements = BTreeMap<String, f64>;

/// DTO for inventory item creation. The ID is derived from `name` when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    #[serde(default, rename = "ingredient_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub unit: String,
    pub quantity: f64,
}

/// DTO for replacing an inventory item's data. The ID never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemUpdate {
    pub name: String,
    pub unit: String,
    pub quantity: f64,
}

pub(crate) fn validate_stock_fields(name: &str, unit: &str, quantity: f64) -> Result<(), ServiceError> {
    require_non_empty("name", name)?;
    require_non_empty("unit", unit)?;
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(ServiceError::invalid(format!(
            "quantity must be a non-negative number, got {quantity}"
        )));
    }
    Ok(())
}

impl InventoryItemCreate {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_stock_fields(&self.name, &self.unit, self.quantity)
    }

    /// The ID this item will be stored under.
    pub fn resolved_id(&self) -> Result<String, ServiceError> {
        resolve_id(self.id.as_deref(), &self.name)
    }
}

impl InventoryItemUpdate {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_stock_fields(&self.name, &self.unit, self.quantity)
    }
}
