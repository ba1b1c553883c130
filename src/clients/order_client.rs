use crate::error::ServiceError;
use crate::framework::ResourceClient;
use crate::model::{Order, OrderRequest, TotalPrice};
use crate::order_actor::OrderAction;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Orchestration (menu lookup, stock reservation, compensation) happens in the Order
/// actor's hooks; this client only shapes requests and results.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_basic_client!(OrderClient, Order, order);

impl OrderClient {
    /// Places an order. Returns the new ID and the order total.
    #[instrument(skip(self, request))]
    pub async fn create_order(&self, request: OrderRequest) -> Result<(String, TotalPrice), ServiceError> {
        debug!(?request, "create_order called");
        info!("Sending create_order to actor");
        let (order, receipt) = self.inner.create(request).await?;
        Ok((order.id, receipt.total))
    }

    /// Appends items to an open order. Returns the updated order and its new total.
    #[instrument(skip(self, request))]
    pub async fn update_order(
        &self,
        id: String,
        request: OrderRequest,
    ) -> Result<(Order, TotalPrice), ServiceError> {
        debug!(?request, "update_order called");
        let (order, receipt) = self.inner.update(id, request).await?;
        Ok((order, receipt.total))
    }

    #[instrument(skip(self))]
    pub async fn close_order(&self, id: String) -> Result<Order, ServiceError> {
        debug!("Sending request");
        self.inner.perform_action(id, OrderAction::Close).await
    }
}
