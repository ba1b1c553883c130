//! Menu-specific resource logic: products and their recipes.

pub mod entity;

pub use entity::MenuContext;

use crate::clients::MenuClient;
use crate::framework::ResourceActor;
use crate::model::MenuItem;
use crate::storage::EntityStore;

/// Creates a new Menu actor and its client.
///
/// The actor must be started with a [`MenuContext`] giving it a view of the inventory.
pub fn new(store: impl EntityStore<MenuItem> + 'static) -> (ResourceActor<MenuItem>, MenuClient) {
    let (actor, generic_client) = ResourceActor::new(32, store);
    let client = MenuClient::new(generic_client);

    (actor, client)
}
