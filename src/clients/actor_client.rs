use crate::error::ServiceError;
use crate::framework::{ActorEntity, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read and delete operations.
///
/// This trait reduces boilerplate by providing default implementations for
/// `get`, `list` and `delete`. The request layer is written against it, so one handler
/// serves all three collections.
#[async_trait]
pub trait ActorClient<T>: Send + Sync
where
    T: ActorEntity<Error = ServiceError>,
{
    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Fetch an entity by ID. A missing entity is `NotFound`.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<T, ServiceError> {
        tracing::debug!("Sending request");
        self.inner()
            .get(id.clone())
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// All entities, sorted by ID.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, ServiceError> {
        tracing::debug!("Sending request");
        self.inner().list().await
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), ServiceError> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await
    }
}
