use super::{EntityStore, StoreError};
use crate::framework::ActorEntity;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::warn;

struct MemoryState<T: ActorEntity> {
    items: HashMap<T::Id, T>,
    failing_writes: usize,
}

/// In-process store. Clones share the same collection.
///
/// [`MemoryStore::fail_next_writes`] makes the next `n` calls to `replace_all` fail
/// without touching the stored collection.
pub struct MemoryStore<T: ActorEntity> {
    state: Arc<Mutex<MemoryState<T>>>,
}

impl<T: ActorEntity> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: ActorEntity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MemoryStore<T> {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: impl IntoIterator<Item = T>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.id().clone(), item))
            .collect();
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                items,
                failing_writes: 0,
            })),
        }
    }

    pub fn fail_next_writes(&self, n: usize) {
        self.lock().failing_writes = n;
    }

    /// Current contents, bypassing the owning actor.
    pub fn contents(&self) -> HashMap<T::Id, T> {
        self.lock().items.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<T: ActorEntity> EntityStore<T> for MemoryStore<T> {
    async fn load_all(&self) -> Result<HashMap<T::Id, T>, StoreError> {
        Ok(self.lock().items.clone())
    }

    async fn replace_all(&self, items: &HashMap<T::Id, T>) -> Result<(), StoreError> {
        let mut state = self.lock();
        if state.failing_writes > 0 {
            state.failing_writes -= 1;
            warn!(remaining = state.failing_writes, "Injected write failure");
            return Err(StoreError::Injected);
        }
        state.items = items.clone();
        Ok(())
    }
}
