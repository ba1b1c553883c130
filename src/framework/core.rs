//! # Core Actor Framework
//!
//! This module defines the generic building blocks for the actor system.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that all resource types must implement.
//! - [`ResourceActor`]: The generic actor that owns one collection.
//! - [`ResourceClient`]: The generic client for communicating with actors.
//! - [`FrameworkError`]: Errors raised by the plumbing itself (closed channels, missing IDs).

use crate::storage::{sorted_records, EntityStore, StoreError};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, Actions and Commands)
// =============================================================================

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Architecture Note
/// By defining a contract (`ActorEntity`) that all our resource types (InventoryItem,
/// MenuItem, Order) must satisfy, we write the `ResourceActor` logic *once* and reuse it
/// everywhere. Associated types keep the payloads apart: an `Order` can only be created
/// from an `OrderCreate`, never from a `MenuItemCreate`.
///
/// # Async & Context
/// Hooks are `async` so they can call other actors. The `Context` type is injected into
/// every hook when the actor is started ("Late Binding" of dependencies).
///
/// # Actions vs Commands
/// An `Action` targets one entity by ID (e.g. closing an order). A `Command` runs against
/// the whole collection in a single turn of the actor loop (e.g. reserving stock for
/// several ingredients at once), which is what makes check-then-deduct atomic.
#[async_trait]
pub trait ActorEntity:
    Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The unique identifier for this entity.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type CreateParams: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type UpdateParams: Send + Sync + Debug;

    /// Enum representing entity-specific operations (e.g. `Close`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Enum representing collection-wide operations (e.g. `Reserve`).
    type Command: Send + Sync + Debug;

    /// The result type returned by commands.
    type CommandResult: Send + Sync + Debug;

    /// What a successful create or update hands back besides the entity itself.
    type Receipt: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    type Error: std::error::Error + From<FrameworkError> + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    /// Pick the ID for a new entity, given the current collection.
    fn assign_id(
        params: &Self::CreateParams,
        existing: &HashMap<Self::Id, Self>,
    ) -> Result<Self::Id, Self::Error>;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is built and before it is stored.
    async fn on_create(&mut self, ctx: &Self::Context) -> Result<Self::Receipt, Self::Error>;

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::UpdateParams,
        ctx: &Self::Context,
    ) -> Result<Self::Receipt, Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when a create or update succeeded but the collection could not be written.
    /// Undo any side effects the hook had on other actors here.
    async fn on_persist_failed(&self, _receipt: &Self::Receipt, _ctx: &Self::Context) {}

    // --- Action & Command Handlers ---

    /// Handle a custom entity-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Handle a collection-wide command. Runs synchronously on the loaded snapshot.
    fn handle_command(
        items: &mut HashMap<Self::Id, Self>,
        command: Self::Command,
    ) -> Result<Self::CommandResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T, R> = oneshot::Sender<Result<R, <T as ActorEntity>::Error>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map to **CRUD** (Create, Get/List, Update, Delete) plus `Action`
/// for entity-specific logic and `Command` for collection-wide logic.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T, (T, T::Receipt)>,
    },
    Get {
        id: T::Id,
        respond_to: Response<T, Option<T>>,
    },
    List {
        respond_to: Response<T, Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::UpdateParams,
        respond_to: Response<T, (T, T::Receipt)>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T, ()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T, T::ActionResult>,
    },
    Command {
        command: T::Command,
        respond_to: Response<T, T::CommandResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that owns one collection.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the receiver end of the
/// channel and the [`EntityStore`] holding the collection.
///
/// **Concurrency Model**:
/// Each actor processes its messages *sequentially*. Every request loads a snapshot,
/// applies the entity hooks to it and writes the whole snapshot back, and no other request
/// for the same collection can run in between. No `Mutex` is needed around the
/// read-modify-write sequence.
///
/// **Failure Model**:
/// The snapshot is only written when it changed. If the write fails the snapshot is
/// dropped, so the durable collection is left exactly as it was.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Box<dyn EntityStore<T>>,
    entity_type: &'static str,
}

impl<T: ActorEntity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        store: impl EntityStore<T> + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // Just the type name (e.g. "Order" instead of "cafe_orders::model::order::Order")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            store: Box::new(store),
            entity_type,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to access external dependencies (like other clients) that were created *after*
    /// the actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    if let Err(e) = &result {
                        warn!(entity_type, error = %e, "Create failed");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let result = self.load().await.map(|mut items| items.remove(&id));
                    debug!(entity_type, %id, found = matches!(result, Ok(Some(_))), "Get");
                    let _ = respond_to.send(result);
                }
                ResourceRequest::List { respond_to } => {
                    let result = self.load().await.map(|items| {
                        sorted_records(&items).into_iter().cloned().collect::<Vec<_>>()
                    });
                    debug!(entity_type, ok = result.is_ok(), "List");
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    if let Err(e) = &result {
                        warn!(entity_type, %id, error = %e, "Update failed");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    if let Err(e) = &result {
                        warn!(entity_type, %id, error = %e, "Delete failed");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.action(&id, action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Command {
                    command,
                    respond_to,
                } => {
                    debug!(entity_type, ?command, "Command");
                    let result = self.command(command).await;
                    match &result {
                        Ok(_) => info!(entity_type, "Command ok"),
                        Err(e) => warn!(entity_type, error = %e, "Command failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, "Shutdown");
    }

    async fn load(&self) -> Result<HashMap<T::Id, T>, T::Error> {
        self.store
            .load_all()
            .await
            .map_err(|e| FrameworkError::Storage(e).into())
    }

    async fn persist(&self, items: &HashMap<T::Id, T>) -> Result<(), T::Error> {
        self.store
            .replace_all(items)
            .await
            .map_err(|e| FrameworkError::Storage(e).into())
    }

    async fn create(
        &self,
        params: T::CreateParams,
        context: &T::Context,
    ) -> Result<(T, T::Receipt), T::Error> {
        let mut items = self.load().await?;
        let id = T::assign_id(&params, &items)?;
        if items.contains_key(&id) {
            return Err(FrameworkError::AlreadyExists(id.to_string()).into());
        }

        let mut item = T::from_create_params(id.clone(), params)?;
        let receipt = item.on_create(context).await?;
        items.insert(id.clone(), item.clone());

        if let Err(e) = self.persist(&items).await {
            item.on_persist_failed(&receipt, context).await;
            return Err(e);
        }
        info!(entity_type = self.entity_type, %id, size = items.len(), "Created");
        Ok((item, receipt))
    }

    async fn update(
        &self,
        id: &T::Id,
        update: T::UpdateParams,
        context: &T::Context,
    ) -> Result<(T, T::Receipt), T::Error> {
        let mut items = self.load().await?;
        let item = items
            .get_mut(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let receipt = item.on_update(update, context).await?;
        let updated = item.clone();

        if let Err(e) = self.persist(&items).await {
            updated.on_persist_failed(&receipt, context).await;
            return Err(e);
        }
        info!(entity_type = self.entity_type, %id, "Updated");
        Ok((updated, receipt))
    }

    async fn delete(&self, id: &T::Id, context: &T::Context) -> Result<(), T::Error> {
        let mut items = self.load().await?;
        let item = items
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete(context).await?;
        items.remove(id);
        self.persist(&items).await?;
        info!(entity_type = self.entity_type, %id, size = items.len(), "Deleted");
        Ok(())
    }

    async fn action(
        &self,
        id: &T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, T::Error> {
        let mut items = self.load().await?;
        let item = items
            .get_mut(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let before = item.clone();
        let result = item.handle_action(action, context).await?;
        if *item != before {
            self.persist(&items).await?;
        }
        Ok(result)
    }

    async fn command(&self, command: T::Command) -> Result<T::CommandResult, T::Error> {
        let mut items = self.load().await?;
        let before = items.clone();
        let result = T::handle_command(&mut items, command)?;
        if items != before {
            self.persist(&items).await?;
        }
        Ok(result)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only a sender, so cloning is cheap and clones can be shared across tasks.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        make: impl FnOnce(Response<T, R>) -> ResourceRequest<T>,
    ) -> Result<R, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Returns the entity as stored, so callers need no follow-up `get`.
    pub async fn create(&self, params: T::CreateParams) -> Result<(T, T::Receipt), T::Error> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, T::Error> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, T::Error> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(
        &self,
        id: T::Id,
        update: T::UpdateParams,
    ) -> Result<(T, T::Receipt), T::Error> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), T::Error> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, T::Error> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    pub async fn execute(&self, command: T::Command) -> Result<T::CommandResult, T::Error> {
        self.request(|respond_to| ResourceRequest::Command {
            command,
            respond_to,
        })
        .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde::Deserialize;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        id: String,
        value: u32,
    }

    #[derive(Debug)]
    struct CounterCreate {
        id: String,
    }

    #[derive(Debug)]
    enum CounterAction {
        Read,
        Bump,
    }

    #[derive(Debug)]
    enum CounterCommand {
        ResetAll,
    }

    #[derive(Debug, thiserror::Error)]
    enum CounterError {
        #[error(transparent)]
        Framework(#[from] FrameworkError),
        #[error("blank id")]
        Blank,
    }

    #[async_trait]
    impl ActorEntity for Counter {
        type Id = String;
        type CreateParams = CounterCreate;
        type UpdateParams = u32;
        type Action = CounterAction;
        type ActionResult = u32;
        type Command = CounterCommand;
        type CommandResult = usize;
        type Receipt = ();
        type Context = ();
        type Error = CounterError;

        fn id(&self) -> &String {
            &self.id
        }

        fn assign_id(params: &CounterCreate, _: &HashMap<String, Self>) -> Result<String, CounterError> {
            if params.id.is_empty() {
                return Err(CounterError::Blank);
            }
            Ok(params.id.clone())
        }

        fn from_create_params(id: String, _: CounterCreate) -> Result<Self, CounterError> {
            Ok(Self { id, value: 0 })
        }

        async fn on_create(&mut self, _: &()) -> Result<(), CounterError> {
            Ok(())
        }

        async fn on_update(&mut self, value: u32, _: &()) -> Result<(), CounterError> {
            self.value = value;
            Ok(())
        }

        async fn handle_action(&mut self, action: CounterAction, _: &()) -> Result<u32, CounterError> {
            if let CounterAction::Bump = action {
                self.value += 1;
            }
            Ok(self.value)
        }

        fn handle_command(
            items: &mut HashMap<String, Self>,
            command: CounterCommand,
        ) -> Result<usize, CounterError> {
            match command {
                CounterCommand::ResetAll => {
                    items.values_mut().for_each(|c| c.value = 0);
                    Ok(items.len())
                }
            }
        }
    }

    fn spawn_counter_actor(store: MemoryStore<Counter>) -> ResourceClient<Counter> {
        let (actor, client) = ResourceActor::new(10, store);
        tokio::spawn(actor.run(()));
        client
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_resource_actor_full_lifecycle() {
        let store = MemoryStore::new();
        let client = spawn_counter_actor(store.clone());

        // 1. Create
        let (created, ()) = client.create(CounterCreate { id: "a".into() }).await.unwrap();
        assert_eq!(created, Counter { id: "a".into(), value: 0 });
        let id = created.id;

        // 2. Action mutates and persists
        assert_eq!(client.perform_action(id.clone(), CounterAction::Bump).await.unwrap(), 1);
        assert_eq!(store.contents()["a"].value, 1);

        // 3. Update
        let (updated, ()) = client.update(id.clone(), 7).await.unwrap();
        assert_eq!(updated.value, 7);

        // 4. Command across the collection
        client.create(CounterCreate { id: "b".into() }).await.unwrap();
        assert_eq!(client.execute(CounterCommand::ResetAll).await.unwrap(), 2);
        let listed = client.list().await.unwrap();
        assert_eq!(listed.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), ["a", "b"]);
        assert!(listed.iter().all(|c| c.value == 0));

        // 5. Delete
        client.delete(id.clone()).await.unwrap();
        assert!(client.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_and_missing_ids_are_reported() {
        let client = spawn_counter_actor(MemoryStore::new());
        client.create(CounterCreate { id: "a".into() }).await.unwrap();

        let dup = client.create(CounterCreate { id: "a".into() }).await;
        assert!(matches!(dup, Err(CounterError::Framework(FrameworkError::AlreadyExists(_)))));

        let missing = client.update("zzz".into(), 1).await;
        assert!(matches!(missing, Err(CounterError::Framework(FrameworkError::NotFound(_)))));

        let blank = client.create(CounterCreate { id: String::new() }).await;
        assert!(matches!(blank, Err(CounterError::Blank)));
    }

    #[tokio::test]
    async fn failed_write_leaves_collection_untouched() {
        let store = MemoryStore::with_items([Counter { id: "a".into(), value: 3 }]);
        let client = spawn_counter_actor(store.clone());

        store.fail_next_writes(1);
        let result = client.perform_action("a".into(), CounterAction::Bump).await;
        assert!(matches!(result, Err(CounterError::Framework(FrameworkError::Storage(_)))));
        assert_eq!(client.get("a".into()).await.unwrap().unwrap().value, 3);
    }

    #[tokio::test]
    async fn read_only_action_does_not_write() {
        let store = MemoryStore::with_items([Counter { id: "a".into(), value: 3 }]);
        let client = spawn_counter_actor(store.clone());

        // Any write would fail; a read must still succeed.
        store.fail_next_writes(1);
        assert_eq!(client.perform_action("a".into(), CounterAction::Read).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn closed_actor_is_reported() {
        let (actor, client) = ResourceActor::<Counter>::new(1, MemoryStore::new());
        drop(actor);
        let result = client.list().await;
        assert!(matches!(result, Err(CounterError::Framework(FrameworkError::ActorClosed))));
    }
}
