//! Order entity and related types.

mod aggregate;
mod state;
mod value_objects;

pub use aggregate::Order;
pub use state::OrderStatus;
pub use value_objects::{ItemPrice, PaymentMethod};

use thiserror::Error;

/// Errors raised by the order entity itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The requested transition is not allowed from the current status.
    #[error("Invalid state transition: cannot {action} from {current_status} status")]
    InvalidStateTransition {
        current_status: OrderStatus,
        action: &'static str,
    },

    /// An order must reference at least one item.
    #[error("Order has no items")]
    NoItems,

    /// The payment method is not part of the accepted vocabulary.
    #[error("Unknown payment method: {0:?}")]
    InvalidPaymentMethod(String),
}
