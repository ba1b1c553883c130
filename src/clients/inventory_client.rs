use crate::clients::StockLedger;
use crate::error::ServiceError;
use crate::framework::ResourceClient;
use crate::inventory_actor::{InventoryAction, InventoryActionResult, InventoryCommand};
use crate::model::{InventoryItem, InventoryItemCreate, InventoryItemUpdate, Requirements};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Inventory actor.
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<InventoryItem>,
}

impl_basic_client!(InventoryClient, InventoryItem, inventory_item);

impl InventoryClient {
    /// Returns the item as stored, including its derived ID.
    #[instrument(skip(self))]
    pub async fn create_inventory_item(&self, params: InventoryItemCreate) -> Result<InventoryItem, ServiceError> {
        debug!("Sending request");
        let (item, ()) = self.inner.create(params).await?;
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn update_inventory_item(
        &self,
        id: String,
        update: InventoryItemUpdate,
    ) -> Result<InventoryItem, ServiceError> {
        debug!("Sending request");
        let (item, ()) = self.inner.update(id, update).await?;
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<f64, ServiceError> {
        debug!("Sending request");
        match self.inner.perform_action(id, InventoryAction::CheckStock).await? {
            InventoryActionResult::CheckStock(level) => Ok(level),
        }
    }
}

#[async_trait]
impl StockLedger for InventoryClient {
    #[instrument(skip(self))]
    async fn reserve(&self, needs: Requirements) -> Result<(), ServiceError> {
        debug!("Sending request");
        self.inner.execute(InventoryCommand::Reserve(needs)).await
    }

    #[instrument(skip(self))]
    async fn release(&self, needs: Requirements) -> Result<(), ServiceError> {
        debug!("Sending request");
        self.inner.execute(InventoryCommand::Release(needs)).await
    }
}
