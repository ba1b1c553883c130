//! ActorEntity trait implementation for the Order domain type.
//!
//! Every order mutation runs inside the Order actor loop, so ID assignment, validation,
//! stock reservation and the order write form one critical section per request.
//!
//! Create and update reserve stock through the [`StockLedger`] *before* the order is
//! written. If that write fails, [`on_persist_failed`](ActorEntity::on_persist_failed)
//! releases the reservation again.

use super::actions::OrderAction;
use super::pricing::{next_order_id, requirements, total_price};
use crate::clients::{CollectionView, StockLedger};
use crate::error::ServiceError;
use crate::framework::ActorEntity;
use crate::model::{
    MenuItem, Order, OrderItem, OrderRequest, OrderStatus, Requirements, TotalPrice,
    TIMESTAMP_FORMAT,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{error, info};

/// Order actor dependencies.
#[derive(Clone)]
pub struct OrderDeps {
    pub menu: Arc<dyn CollectionView<MenuItem>>,
    pub stock: Arc<dyn StockLedger>,
}

/// Outcome of a successful create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    /// Price of the whole order after the operation.
    pub total: TotalPrice,
    /// Stock deducted by this operation.
    pub reserved: Requirements,
}

impl Order {
    /// Resolves `items` against the menu and reserves their ingredients.
    async fn reserve_for(
        items: &[OrderItem],
        deps: &OrderDeps,
    ) -> Result<(HashMap<String, MenuItem>, Requirements), ServiceError> {
        let menu = deps.menu.load_all().await?;
        let needs = requirements(items, &menu)?;
        if !needs.is_empty() {
            deps.stock.reserve(needs.clone()).await?;
        }
        Ok((menu, needs))
    }

    fn ensure_open(&self) -> Result<(), ServiceError> {
        if self.is_closed() {
            return Err(ServiceError::OrderClosed(self.id.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = String;
    type CreateParams = OrderRequest;
    type UpdateParams = OrderRequest;
    type Action = OrderAction;
    type ActionResult = Order;
    type Command = Infallible;
    type CommandResult = ();
    type Receipt = OrderReceipt;
    type Context = OrderDeps;
    type Error = ServiceError;

    fn id(&self) -> &String {
        &self.id
    }

    fn assign_id(params: &OrderRequest, existing: &HashMap<String, Self>) -> Result<String, ServiceError> {
        params.validate()?;
        next_order_id(existing)
    }

    fn from_create_params(id: String, params: OrderRequest) -> Result<Self, ServiceError> {
        Ok(Self {
            id,
            customer_name: params.customer_name,
            items: params.items,
            status: OrderStatus::Open,
            created_at: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        })
    }

    async fn on_create(&mut self, deps: &OrderDeps) -> Result<OrderReceipt, ServiceError> {
        let (menu, reserved) = Order::reserve_for(&self.items, deps).await?;
        Ok(OrderReceipt {
            total: total_price(&self.items, &menu),
            reserved,
        })
    }

    /// Appends items and replaces the customer name.
    ///
    /// Existence and status are checked before anything is reserved, so a rejected
    /// update never touches inventory.
    async fn on_update(&mut self, update: OrderRequest, deps: &OrderDeps) -> Result<OrderReceipt, ServiceError> {
        self.ensure_open()?;
        update.validate()?;
        let (menu, reserved) = Order::reserve_for(&update.items, deps).await?;

        self.customer_name = update.customer_name;
        self.items.extend(update.items);
        Ok(OrderReceipt {
            total: total_price(&self.items, &menu),
            reserved,
        })
    }

    /// Closed orders cannot be deleted. Deleting an open order does not return its stock.
    async fn on_delete(&self, _deps: &OrderDeps) -> Result<(), ServiceError> {
        self.ensure_open()
    }

    async fn on_persist_failed(&self, receipt: &OrderReceipt, deps: &OrderDeps) {
        if receipt.reserved.is_empty() {
            return;
        }
        match deps.stock.release(receipt.reserved.clone()).await {
            Ok(()) => info!(order_id = %self.id, "Released stock after failed write"),
            Err(e) => error!(order_id = %self.id, error = %e, "Failed to release stock after failed write"),
        }
    }

    async fn handle_action(&mut self, action: OrderAction, _deps: &OrderDeps) -> Result<Order, ServiceError> {
        match action {
            OrderAction::Close => {
                self.ensure_open()?;
                self.status = OrderStatus::Closed;
                Ok(self.clone())
            }
        }
    }

    fn handle_command(_: &mut HashMap<String, Self>, command: Infallible) -> Result<(), ServiceError> {
        match command {}
    }
}
