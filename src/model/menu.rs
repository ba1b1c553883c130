use super::{require_non_empty, resolve_id};
use crate::error::ServiceError;
use serde::{Deserialize, Serialize};

/// One line of a recipe: how much of an ingredient a single unit of the product uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemIngredient {
    pub ingredient_id: String,
    pub quantity: f64,
}

/// A sellable product with a fixed recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "product_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub ingredients: Vec<MenuItemIngredient>,
}

/// DTO for menu item creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    #[serde(default, rename = "product_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub ingredients: Vec<MenuItemIngredient>,
}

/// DTO for replacing a menu item's data. The ID never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub ingredients: Vec<MenuItemIngredient>,
}

pub(crate) fn default_description(name: &str, description: String) -> String {
    if description.trim().is_empty() {
        format!("Very tasty {name}")
    } else {
        description
    }
}

pub(crate) fn validate_menu_fields(
    name: &str,
    price: f64,
    ingredients: &[MenuItemIngredient],
) -> Result<(), ServiceError> {
    require_non_empty("name", name)?;
    if !price.is_finite() || price <= 0.0 {
        return Err(ServiceError::invalid(format!("price must be positive, got {price}")));
    }
    for ingredient in ingredients {
        require_non_empty("ingredient_id", &ingredient.ingredient_id)?;
        if !ingredient.quantity.is_finite() || ingredient.quantity <= 0.0 {
            return Err(ServiceError::invalid(format!(
                "ingredient {} quantity must be positive, got {}",
                ingredient.ingredient_id, ingredient.quantity
            )));
        }
    }
    Ok(())
}

impl MenuItemCreate {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_menu_fields(&self.name, self.price, &self.ingredients)
    }

    pub fn resolved_id(&self) -> Result<String, ServiceError> {
        resolve_id(self.id.as_deref(), &self.name)
    }
}

impl MenuItemUpdate {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_menu_fields(&self.name, self.price, &self.ingredients)
    }
}
