//! Custom actions for the Order actor.

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves an open order to `closed`.
    ///
    /// # Errors
    /// `OrderClosed` if the order is already closed; closing is not idempotent.
    Close,
}
