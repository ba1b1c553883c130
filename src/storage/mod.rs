//! # Entity Store
//!
//! Durable keyed storage for the three collections. A store only knows how to hand
//! out the full collection and how to replace it; all read-modify-write sequencing is
//! done by the [`ResourceActor`](crate::framework::ResourceActor) that owns the store.
//!
//! - [`JsonFileStore`] keeps one JSON array per collection on disk.
//! - [`MemoryStore`] keeps the collection in process and can simulate write failures.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::framework::ActorEntity;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by an [`EntityStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A stored record violates a format the engine depends on.
    #[error("corrupt record: {0}")]
    CorruptRecord(String),

    #[error("injected write failure")]
    Injected,
}

/// Load-all / replace-all access to one collection.
///
/// `load_all` on a store that was never written returns an empty map, never an error.
#[async_trait]
pub trait EntityStore<T: ActorEntity>: Send + Sync {
    async fn load_all(&self) -> Result<HashMap<T::Id, T>, StoreError>;

    async fn replace_all(&self, items: &HashMap<T::Id, T>) -> Result<(), StoreError>;
}

/// Records in ID order, so persisted files and listings are stable.
pub(crate) fn sorted_records<T: ActorEntity>(items: &HashMap<T::Id, T>) -> Vec<&T> {
    let mut records: Vec<&T> = items.values().collect();
    records.sort_by(|a, b| a.id().cmp(b.id()));
    records
}
