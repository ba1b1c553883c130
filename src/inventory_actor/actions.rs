//! Custom actions and commands for the Inventory actor.
//!
//! Actions target one [`InventoryItem`](crate::model::InventoryItem); commands run against
//! the whole inventory in one turn of the actor loop.

use crate::model::Requirements;

/// Custom actions for inventory items.
#[derive(Debug, Clone)]
pub enum InventoryAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
}

/// Results from InventoryActions - variants match 1:1 with InventoryAction
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryActionResult {
    CheckStock(f64),
}

/// Collection-wide stock operations.
#[derive(Debug, Clone)]
pub enum InventoryCommand {
    /// Checks every requirement, then deducts all of them.
    ///
    /// # Errors
    /// `InsufficientStock` for the first (by ingredient ID) ingredient that is missing
    /// or under-stocked; nothing is deducted in that case.
    Reserve(Requirements),

    /// Adds the quantities back. Ingredients that no longer exist are skipped.
    Release(Requirements),
}
