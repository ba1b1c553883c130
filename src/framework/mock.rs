//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_command`] to assert behavior.
//! [`MockClient`] offers the same thing with queued, pre-programmed answers.

use crate::framework::{ActorEntity, ResourceClient, ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client, with the answer to give.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, T::Error>,
    },
    List {
        response: Result<Vec<T>, T::Error>,
    },
    Create {
        response: Result<(T, T::Receipt), T::Error>,
    },
    Update {
        id: T::Id,
        response: Result<(T, T::Receipt), T::Error>,
    },
    Delete {
        id: T::Id,
        response: Result<(), T::Error>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, T::Error>,
    },
    Command {
        response: Result<T::CommandResult, T::Error>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorEntity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

fn answer<T: ActorEntity, R>(respond_to: Response<T, R>, response: Result<R, T::Error>) {
    let _ = respond_to.send(response);
}

fn check_id<T: ActorEntity>(op: &str, got: &T::Id, expected: &T::Id) {
    assert_eq!(got, expected, "{op} called with unexpected id");
}

/// A mock client with expectation tracking for fluent testing.
///
/// Requests are matched against expectations in the order they were queued; any request
/// that does not match the head of the queue panics the background task, which surfaces
/// as an `Unavailable`-style error on the caller side.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<MenuItem>::new();
/// mock.expect_list().return_ok(vec![latte]);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                // Release lock before answering
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        check_id::<T>("get", &id, &want);
                        answer::<T, _>(respond_to, response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        answer::<T, _>(respond_to, response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        answer::<T, _>(respond_to, response);
                    }
                    (ResourceRequest::Update { id, respond_to, .. }, Some(Expectation::Update { id: want, response })) => {
                        check_id::<T>("update", &id, &want);
                        answer::<T, _>(respond_to, response);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
                        check_id::<T>("delete", &id, &want);
                        answer::<T, _>(respond_to, response);
                    }
                    (ResourceRequest::Action { id, respond_to, .. }, Some(Expectation::Action { id: want, response })) => {
                        check_id::<T>("action", &id, &want);
                        answer::<T, _>(respond_to, response);
                    }
                    (ResourceRequest::Command { respond_to, .. }, Some(Expectation::Command { response })) => {
                        answer::<T, _>(respond_to, response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, (T, T::Receipt)> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, (T, T::Receipt)> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    pub fn expect_command(&mut self) -> ExpectationBuilder<T, T::CommandResult> {
        self.builder(|response| Expectation::Command { response })
    }

    fn builder<R>(
        &self,
        wrap: impl FnOnce(Result<R, T::Error>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap: Box::new(wrap),
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Queues the answer for one expected request.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    wrap: Box<dyn FnOnce(Result<R, T::Error>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        lock(&self.expectations).push_back((self.wrap)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: T::Error) {
        lock(&self.expectations).push_back((self.wrap)(Err(error)));
    }
}

// =============================================================================
// RECEIVER HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// In unit tests we don't want to spin up a full `ResourceActor` when we are testing
/// the logic of *another* actor that merely calls this one (e.g. the order actor calling
/// inventory). The client sends messages to a channel we control, so the test can
/// inspect each request and decide the answer (success, failure, or never answering).
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Response<T, (T, T::Receipt)>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<T, Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Response<T, Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T, T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Command request
pub async fn expect_command<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Command, Response<T, T::CommandResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Command {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::inventory_actor::InventoryCommand;
    use crate::model::{InventoryItem, InventoryItemCreate, Requirements};

    fn milk() -> InventoryItem {
        InventoryItem {
            id: "milk".into(),
            name: "Milk".into(),
            unit: "ml".into(),
            quantity: 500.0,
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<InventoryItem>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(InventoryItemCreate {
                    id: None,
                    name: "Milk".into(),
                    unit: "ml".into(),
                    quantity: 500.0,
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Milk");
        responder.send(Ok((milk(), ()))).unwrap();

        let (item, ()) = create_task.await.unwrap().unwrap();
        assert_eq!(item.id, "milk");
    }

    #[tokio::test]
    async fn test_mock_client_command_round() {
        let (client, mut receiver) = create_mock_client::<InventoryItem>(10);

        let task = tokio::spawn(async move {
            let mut needs = Requirements::new();
            needs.insert("milk".into(), 900.0);
            client.execute(InventoryCommand::Reserve(needs)).await
        });

        let (command, responder) = expect_command(&mut receiver).await.unwrap();
        assert!(matches!(command, InventoryCommand::Reserve(ref r) if r["milk"] == 900.0));
        responder
            .send(Err(ServiceError::InsufficientStock {
                ingredient_id: "milk".into(),
                required: 900.0,
                available: 500.0,
            }))
            .unwrap();

        let result = task.await.unwrap();
        assert!(matches!(result, Err(ServiceError::InsufficientStock { .. })));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<InventoryItem>::new();

        mock.expect_list().return_ok(vec![milk()]);
        mock.expect_get("milk".to_string()).return_ok(Some(milk()));
        mock.expect_delete("milk".to_string())
            .return_err(ServiceError::NotFound("milk".into()));

        let client = mock.client();

        assert_eq!(client.list().await.unwrap(), vec![milk()]);
        let fetched = client.get("milk".to_string()).await.unwrap();
        assert_eq!(fetched.unwrap().quantity, 500.0);
        assert!(matches!(
            client.delete("milk".to_string()).await,
            Err(ServiceError::NotFound(_))
        ));

        mock.verify();
    }
}
