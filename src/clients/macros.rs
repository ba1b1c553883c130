/// Generates the constructor, the [`ActorClient`](crate::clients::ActorClient) and
/// [`CollectionView`](crate::clients::CollectionView) impls, and `get_`/`list_`/`delete_`
/// methods named after the entity.
///
/// The client struct must have a single `inner: ResourceClient<$entity>` field.
macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $entity_name_snake:ident) => {
        impl $client_name {
            pub fn new(inner: $crate::framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }

        impl $crate::clients::ActorClient<$entity> for $client_name {
            fn inner(&self) -> &$crate::framework::ResourceClient<$entity> {
                &self.inner
            }
        }

        #[async_trait::async_trait]
        impl $crate::clients::CollectionView<$entity> for $client_name {
            async fn load_all(
                &self,
            ) -> Result<std::collections::HashMap<String, $entity>, $crate::error::ServiceError> {
                let items = $crate::clients::ActorClient::list(self).await?;
                Ok(items
                    .into_iter()
                    .map(|item| (item.id.clone(), item))
                    .collect())
            }
        }

        paste::paste! {
            impl $client_name {
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: String,
                ) -> Result<$entity, $crate::error::ServiceError> {
                    $crate::clients::ActorClient::get(self, id).await
                }

                pub async fn [<list_ $entity_name_snake s>](
                    &self,
                ) -> Result<Vec<$entity>, $crate::error::ServiceError> {
                    $crate::clients::ActorClient::list(self).await
                }

                pub async fn [<delete_ $entity_name_snake>](
                    &self,
                    id: String,
                ) -> Result<(), $crate::error::ServiceError> {
                    $crate::clients::ActorClient::delete(self, id).await
                }
            }
        }
    };
}
