//! Pure data structures (DTOs) implementing the [`ActorEntity`](crate::framework::ActorEntity) trait.
//!
//! Field names on the wire and on disk are snake_case (`ingredient_id`, `product_id`,
//! `order_id`, ...) regardless of the Rust field name.

pub mod inventory;
pub mod menu;
pub mod order;
pub mod report;

pub use inventory::*;
pub use menu::*;
pub use order::*;
pub use report::*;

use crate::error::ServiceError;

/// Derives an ID from a display name: lower-case, every run of non-alphanumeric
/// characters collapsed to `_`, no leading or trailing `_`.
///
/// `"Espresso Shot"` becomes `"espresso_shot"`.
pub fn id_from_name(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !id.is_empty() {
                id.push('_');
            }
            pending_sep = false;
            id.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    id
}

/// Uses the explicit ID when given, otherwise derives one from the name.
pub(crate) fn resolve_id(explicit: Option<&str>, name: &str) -> Result<String, ServiceError> {
    let id = match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(id) => id.to_string(),
        None => id_from_name(name),
    };
    if id.is_empty() {
        return Err(ServiceError::invalid(format!("cannot derive an id from name {name:?}")));
    }
    Ok(id)
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::invalid(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_from_name_collapses_separators() {
        assert_eq!(id_from_name("Espresso Shot"), "espresso_shot");
        assert_eq!(id_from_name("  Hot -- Chocolate!! "), "hot_chocolate");
        assert_eq!(id_from_name("Café Latte 2"), "café_latte_2");
        assert_eq!(id_from_name("***"), "");
    }

    #[test]
    fn resolve_id_prefers_explicit_id() {
        assert_eq!(resolve_id(Some("milk_2"), "Milk").unwrap(), "milk_2");
        assert_eq!(resolve_id(Some("  "), "Whole Milk").unwrap(), "whole_milk");
        assert_eq!(resolve_id(None, "Sugar").unwrap(), "sugar");
        assert!(resolve_id(None, "!!!").is_err());
    }
}
