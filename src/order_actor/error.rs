//! Error types for the Order actor.

use crate::model::OrderStatus;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// An order with this id has already been placed.
    #[error("Order already exists: {0}")]
    Duplicate(String),

    #[error("Table number is required")]
    MissingTable,

    #[error("Customer name is required")]
    MissingCustomer,

    #[error("Order has no items")]
    EmptyOrder,

    #[error("Invalid item {item_id}: {reason}")]
    InvalidItem { item_id: String, reason: String },

    #[error("Order total is too large")]
    TotalOverflow,

    /// Orders are always placed in state `new`.
    #[error("New orders must start as 'new', got '{0}'")]
    InvalidInitialStatus(OrderStatus),

    /// The requested status is not the immediate successor of the current one.
    #[error("Cannot move order from '{from}' to '{to}'")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Communication with the order actor failed.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
