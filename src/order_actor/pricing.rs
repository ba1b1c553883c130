//! Pure order arithmetic: ingredient requirements, totals and ID assignment.

use crate::error::ServiceError;
use crate::model::{order_number, MenuItem, Order, OrderItem, Requirements, TotalPrice};
use crate::storage::StoreError;
use std::collections::HashMap;

/// Ingredient quantities needed to make `items`, summed per distinct ingredient.
///
/// # Errors
/// `NotFound` if any product is not on the menu.
pub fn requirements(
    items: &[OrderItem],
    menu: &HashMap<String, MenuItem>,
) -> Result<Requirements, ServiceError> {
    let mut needs = Requirements::new();
    for item in items {
        let product = menu
            .get(&item.product_id)
            .ok_or_else(|| ServiceError::NotFound(format!("menu item {}", item.product_id)))?;
        for ingredient in &product.ingredients {
            *needs.entry(ingredient.ingredient_id.clone()).or_insert(0.0) +=
                ingredient.quantity * f64::from(item.quantity);
        }
    }
    Ok(needs)
}

/// Σ quantity × unit price. Products missing from the menu contribute nothing.
pub fn total_price(items: &[OrderItem], menu: &HashMap<String, MenuItem>) -> TotalPrice {
    let total_sales = items
        .iter()
        .filter_map(|item| {
            menu.get(&item.product_id)
                .map(|product| product.price * f64::from(item.quantity))
        })
        .sum();
    TotalPrice { total_sales }
}

/// `order<max+1>` over the existing IDs, `order1` for an empty collection.
///
/// # Errors
/// A stored ID that is not `order<N>`, or whose number leaves no successor, means the
/// collection is corrupt.
pub fn next_order_id(existing: &HashMap<String, Order>) -> Result<String, ServiceError> {
    let mut max: u64 = 0;
    for id in existing.keys() {
        let n = order_number(id)
            .ok_or_else(|| StoreError::CorruptRecord(format!("order id {id:?}")))?;
        max = max.max(n);
    }
    let next = max
        .checked_add(1)
        .ok_or_else(|| StoreError::CorruptRecord(format!("order id overflow after order{max}")))?;
    Ok(format!("order{next}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{MenuItemIngredient, OrderStatus};

    fn product(id: &str, price: f64, recipe: &[(&str, f64)]) -> (String, MenuItem) {
        let item = MenuItem {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            price,
            ingredients: recipe
                .iter()
                .map(|&(ingredient_id, quantity)| MenuItemIngredient {
                    ingredient_id: ingredient_id.into(),
                    quantity,
                })
                .collect(),
        };
        (id.to_string(), item)
    }

    fn line(product_id: &str, quantity: u32) -> OrderItem {
        OrderItem {
            product_id: product_id.into(),
            quantity,
        }
    }

    fn orders(ids: &[&str]) -> HashMap<String, Order> {
        ids.iter()
            .map(|&id| {
                let order = Order {
                    id: id.into(),
                    customer_name: "x".into(),
                    items: vec![],
                    status: OrderStatus::Open,
                    created_at: String::new(),
                };
                (id.to_string(), order)
            })
            .collect()
    }

    #[test]
    fn requirements_are_summed_per_ingredient() {
        let menu: HashMap<_, _> = [
            product("latte", 3.5, &[("milk", 200.0), ("espresso", 30.0)]),
            product("flat_white", 4.0, &[("milk", 150.0), ("espresso", 60.0)]),
        ]
        .into_iter()
        .collect();

        let needs = requirements(&[line("latte", 2), line("flat_white", 1)], &menu).unwrap();
        assert_eq!(needs["milk"], 550.0);
        assert_eq!(needs["espresso"], 120.0);
        assert_eq!(needs.len(), 2);
    }

    #[test]
    fn unknown_product_is_not_found() {
        let menu: HashMap<_, _> = [product("latte", 3.5, &[])].into_iter().collect();
        let err = requirements(&[line("mocha", 1)], &menu).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn total_is_linear_in_price_and_quantity() {
        let menu: HashMap<_, _> = [product("a", 3.5, &[]), product("b", 10.0, &[])]
            .into_iter()
            .collect();
        let total = total_price(&[line("a", 2), line("b", 1)], &menu);
        assert_eq!(total.total_sales, 17.0);

        let with_missing = total_price(&[line("a", 2), line("gone", 5)], &menu);
        assert_eq!(with_missing.total_sales, 7.0);
    }

    #[test]
    fn next_id_is_max_plus_one() {
        assert_eq!(next_order_id(&orders(&[])).unwrap(), "order1");
        assert_eq!(next_order_id(&orders(&["order2", "order10", "order3"])).unwrap(), "order11");
    }

    #[test]
    fn malformed_stored_id_is_corrupt_storage() {
        let err = next_order_id(&orders(&["order1", "order_7"])).unwrap_err();
        assert!(matches!(err, ServiceError::Storage(StoreError::CorruptRecord(_))));
    }

    #[test]
    fn largest_stored_number_has_no_successor() {
        let last = format!("order{}", u64::MAX);
        let err = next_order_id(&orders(&["order1", &last])).unwrap_err();
        assert!(matches!(err, ServiceError::Storage(StoreError::CorruptRecord(_))));
    }
}
