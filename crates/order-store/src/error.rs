use common::OrderId;
use thiserror::Error;

/// Errors that can occur when interacting with the order store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No order is stored under this id.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// An order is already stored under this id.
    #[error("Order already exists: {0}")]
    AlreadyExists(OrderId),
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
