//! Inventory-specific resource logic: ingredient CRUD and stock accounting.

mod actions;
pub mod entity;

pub use actions::*;

use crate::clients::InventoryClient;
use crate::framework::ResourceActor;
use crate::model::InventoryItem;
use crate::storage::EntityStore;

/// Creates a new Inventory actor and its client.
pub fn new(store: impl EntityStore<InventoryItem> + 'static) -> (ResourceActor<InventoryItem>, InventoryClient) {
    let (actor, generic_client) = ResourceActor::new(32, store);
    let client = InventoryClient::new(generic_client);

    (actor, client)
}
