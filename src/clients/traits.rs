//! Capability interfaces between actors.
//!
//! An actor that needs another collection depends on the narrowest capability it uses,
//! not on the other actor's client. This also lets tests hand in fixed snapshots.

use crate::error::ServiceError;
use crate::framework::ActorEntity;
use crate::model::Requirements;
use async_trait::async_trait;
use std::collections::HashMap;

/// Read-only snapshot of a collection.
#[async_trait]
pub trait CollectionView<T: ActorEntity>: Send + Sync {
    async fn load_all(&self) -> Result<HashMap<T::Id, T>, ServiceError>;
}

/// Moves ingredient stock in and out of inventory.
#[async_trait]
pub trait StockLedger: Send + Sync {
    /// Deducts every requirement, or nothing at all.
    async fn reserve(&self, needs: Requirements) -> Result<(), ServiceError>;

    /// Returns previously reserved stock.
    async fn release(&self, needs: Requirements) -> Result<(), ServiceError>;
}
