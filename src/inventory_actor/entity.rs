//! ActorEntity trait implementation for the InventoryItem domain type.
//!
//! Stock accounting lives in [`handle_command`](ActorEntity::handle_command): reservation
//! checks all requirements before touching any quantity, so a rejected reservation leaves
//! every ingredient as it was.

use super::actions::{InventoryAction, InventoryActionResult, InventoryCommand};
use crate::error::ServiceError;
use crate::framework::ActorEntity;
use crate::model::{InventoryItem, InventoryItemCreate, InventoryItemUpdate, Requirements};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::warn;

#[async_trait]
impl ActorEntity for InventoryItem {
    type Id = String;
    type CreateParams = InventoryItemCreate;
    type UpdateParams = InventoryItemUpdate;
    type Action = InventoryAction;
    type ActionResult = InventoryActionResult;
    type Command = InventoryCommand;
    type CommandResult = ();
    type Receipt = ();
    type Context = ();
    type Error = ServiceError;

    fn id(&self) -> &String {
        &self.id
    }

    fn assign_id(params: &InventoryItemCreate, _: &HashMap<String, Self>) -> Result<String, ServiceError> {
        params.resolved_id()
    }

    fn from_create_params(id: String, params: InventoryItemCreate) -> Result<Self, ServiceError> {
        params.validate()?;
        Ok(Self {
            id,
            name: params.name,
            unit: params.unit,
            quantity: params.quantity,
        })
    }

    async fn on_create(&mut self, _ctx: &()) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Replaces name, unit and quantity.
    async fn on_update(&mut self, update: InventoryItemUpdate, _ctx: &()) -> Result<(), ServiceError> {
        update.validate()?;
        self.name = update.name;
        self.unit = update.unit;
        self.quantity = update.quantity;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: InventoryAction,
        _ctx: &(),
    ) -> Result<InventoryActionResult, ServiceError> {
        match action {
            InventoryAction::CheckStock => Ok(InventoryActionResult::CheckStock(self.quantity)),
        }
    }

    fn handle_command(
        items: &mut HashMap<String, Self>,
        command: InventoryCommand,
    ) -> Result<(), ServiceError> {
        match command {
            InventoryCommand::Reserve(needs) => reserve(items, &needs),
            InventoryCommand::Release(needs) => {
                release(items, &needs);
                Ok(())
            }
        }
    }
}

fn reserve(items: &mut HashMap<String, InventoryItem>, needs: &Requirements) -> Result<(), ServiceError> {
    // Check everything first: no partial deduction.
    for (ingredient_id, &required) in needs {
        let available = items.get(ingredient_id).map(|item| item.quantity);
        match available {
            Some(available) if available >= required => {}
            _ => {
                return Err(ServiceError::InsufficientStock {
                    ingredient_id: ingredient_id.clone(),
                    required,
                    available: available.unwrap_or(0.0),
                })
            }
        }
    }

    for (ingredient_id, required) in needs {
        if let Some(item) = items.get_mut(ingredient_id) {
            item.quantity -= required;
        }
    }
    Ok(())
}

fn release(items: &mut HashMap<String, InventoryItem>, needs: &Requirements) {
    for (ingredient_id, quantity) in needs {
        match items.get_mut(ingredient_id) {
            Some(item) => item.quantity += quantity,
            None => warn!(%ingredient_id, quantity, "Released stock for a deleted ingredient"),
        }
    }
}
