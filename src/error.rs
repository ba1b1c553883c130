//! # Service Errors
//!
//! One closed set of error kinds shared by every actor and client in the system.
//! Callers match on [`ServiceError::kind`] instead of comparing messages, and the
//! request layer turns each kind into a status category.

use crate::framework::FrameworkError;
use crate::storage::StoreError;
use thiserror::Error;

/// Errors returned by inventory, menu, order and report operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required field is missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An entity with the same ID already exists.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// A mutation was attempted on a closed order.
    #[error("order {0} is already closed")]
    OrderClosed(String),

    /// An ingredient is missing from inventory or has too little stock.
    #[error("insufficient ingredient {ingredient_id}: required {required}, available {available}")]
    InsufficientStock {
        ingredient_id: String,
        required: f64,
        available: f64,
    },

    /// The entity store could not be read or written.
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),

    /// The owning actor is no longer running.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Discriminant of [`ServiceError`], for matching by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    AlreadyExists,
    OrderClosed,
    InsufficientStock,
    Storage,
    Unavailable,
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::InvalidInput(_) => ErrorKind::InvalidInput,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            ServiceError::OrderClosed(_) => ErrorKind::OrderClosed,
            ServiceError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            ServiceError::Storage(_) => ErrorKind::Storage,
            ServiceError::Unavailable(_) => ErrorKind::Unavailable,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ServiceError::InvalidInput(msg.into())
    }
}

impl From<FrameworkError> for ServiceError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                ServiceError::Unavailable(e.to_string())
            }
            FrameworkError::NotFound(id) => ServiceError::NotFound(id),
            FrameworkError::AlreadyExists(id) => ServiceError::AlreadyExists(id),
            FrameworkError::Storage(source) => ServiceError::Storage(source),
        }
    }
}
