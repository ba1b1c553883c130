use crate::error::ServiceError;
use crate::framework::ResourceClient;
use crate::model::{MenuItem, MenuItemCreate, MenuItemUpdate};
use tracing::{debug, instrument};

/// Client for interacting with the Menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl_basic_client!(MenuClient, MenuItem, menu_item);

impl MenuClient {
    #[instrument(skip(self))]
    pub async fn create_menu_item(&self, params: MenuItemCreate) -> Result<MenuItem, ServiceError> {
        debug!("Sending request");
        let (item, ()) = self.inner.create(params).await?;
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn update_menu_item(&self, id: String, update: MenuItemUpdate) -> Result<MenuItem, ServiceError> {
        debug!("Sending request");
        let (item, ()) = self.inner.update(id, update).await?;
        Ok(item)
    }
}
