//! Order-specific resource logic: the order engine.
//!
//! The order actor never touches the inventory collection directly. It reads the menu
//! through a [`CollectionView`](crate::clients::CollectionView) and moves stock through a
//! [`StockLedger`](crate::clients::StockLedger), both injected via [`OrderDeps`].

mod actions;
pub mod entity;
pub mod pricing;

pub use actions::*;
pub use entity::{OrderDeps, OrderReceipt};

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::Order;
use crate::storage::EntityStore;

/// Creates a new Order actor and its client.
pub fn new(store: impl EntityStore<Order> + 'static) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(32, store);
    let client = OrderClient::new(generic_client);

    (actor, client)
}
