//! ActorEntity trait implementation for the MenuItem domain type.
//!
//! Ingredient references are checked against an inventory snapshot when a menu item is
//! created or updated. Later inventory deletions are not re-checked.

use crate::clients::CollectionView;
use crate::error::ServiceError;
use crate::framework::ActorEntity;
use crate::model::menu::default_description;
use crate::model::{InventoryItem, MenuItem, MenuItemCreate, MenuItemIngredient, MenuItemUpdate};
use async_trait::async_trait;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

/// Menu actor dependencies: read-only access to inventory.
pub type MenuContext = Arc<dyn CollectionView<InventoryItem>>;

async fn check_ingredients_exist(
    ingredients: &[MenuItemIngredient],
    inventory: &MenuContext,
) -> Result<(), ServiceError> {
    if ingredients.is_empty() {
        return Ok(());
    }
    let stock = inventory.load_all().await?;
    match ingredients.iter().find(|i| !stock.contains_key(&i.ingredient_id)) {
        Some(missing) => Err(ServiceError::NotFound(format!(
            "ingredient {}",
            missing.ingredient_id
        ))),
        None => Ok(()),
    }
}

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = String;
    type CreateParams = MenuItemCreate;
    type UpdateParams = MenuItemUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Command = Infallible;
    type CommandResult = ();
    type Receipt = ();
    type Context = MenuContext;
    type Error = ServiceError;

    fn id(&self) -> &String {
        &self.id
    }

    fn assign_id(params: &MenuItemCreate, _: &HashMap<String, Self>) -> Result<String, ServiceError> {
        params.resolved_id()
    }

    fn from_create_params(id: String, params: MenuItemCreate) -> Result<Self, ServiceError> {
        params.validate()?;
        Ok(Self {
            id,
            description: default_description(&params.name, params.description),
            name: params.name,
            price: params.price,
            ingredients: params.ingredients,
        })
    }

    async fn on_create(&mut self, inventory: &MenuContext) -> Result<(), ServiceError> {
        check_ingredients_exist(&self.ingredients, inventory).await
    }

    async fn on_update(&mut self, update: MenuItemUpdate, inventory: &MenuContext) -> Result<(), ServiceError> {
        update.validate()?;
        check_ingredients_exist(&update.ingredients, inventory).await?;
        self.description = default_description(&update.name, update.description);
        self.name = update.name;
        self.price = update.price;
        self.ingredients = update.ingredients;
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _: &MenuContext) -> Result<(), ServiceError> {
        match action {}
    }

    fn handle_command(_: &mut HashMap<String, Self>, command: Infallible) -> Result<(), ServiceError> {
        match command {}
    }
}
