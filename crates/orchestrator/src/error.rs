//! Orchestrator error types.

use common::{ItemId, OrderId, TransactionId};
use domain::{OrderError, OrderStatus};
use gateways::GatewayError;
use order_store::StoreError;
use thiserror::Error;

/// Errors returned by order orchestration.
///
/// Each variant is a distinct outcome the request adapter can tell apart;
/// `kind()` folds them into the coarse classes clients retry on.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// No order is stored under this id.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// Some requested items are unknown to the inventory.
    #[error("Items not found: {}", join(.missing))]
    ItemsNotFound { missing: Vec<ItemId> },

    /// The order request listed no items.
    #[error("Order has no items")]
    NoItems,

    /// The payment method is not part of the accepted vocabulary.
    #[error("Invalid payment method: {0:?}")]
    InvalidPaymentMethod(String),

    /// The order's status does not allow the requested transition.
    #[error("Conflict: cannot {action} an order in {current_status} status")]
    Conflict {
        current_status: OrderStatus,
        action: &'static str,
    },

    /// The order changed status while its payment was in flight.
    #[error(
        "Conflict: order became {current_status} while being charged; transaction {transaction_id} was not recorded"
    )]
    ChargeConflict {
        current_status: OrderStatus,
        transaction_id: TransactionId,
    },

    /// The inventory collaborator failed.
    #[error("Inventory unavailable: {0}")]
    InventoryUnavailable(#[source] GatewayError),

    /// The payment collaborator could not be reached.
    #[error("Payment unavailable: {0}")]
    PaymentUnavailable(#[source] GatewayError),

    /// The payment collaborator refused the charge.
    #[error("Payment failed: {0}")]
    PaymentFailed(#[source] GatewayError),

    /// The payment collaborator answered with unusable data.
    #[error("Invalid payment response: {0}")]
    PaymentResponseInvalid(String),

    /// Unexpected order store failure.
    #[error("Order store error: {0}")]
    Store(StoreError),
}

/// Coarse error classes exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidInput,
    CollaboratorUnavailable,
    CollaboratorResponseInvalid,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::CollaboratorUnavailable => "collaborator_unavailable",
            ErrorKind::CollaboratorResponseInvalid => "collaborator_response_invalid",
            ErrorKind::Internal => "internal",
        }
    }
}

impl OrchestratorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrchestratorError::NotFound(_) | OrchestratorError::ItemsNotFound { .. } => {
                ErrorKind::NotFound
            }
            OrchestratorError::Conflict { .. } | OrchestratorError::ChargeConflict { .. } => {
                ErrorKind::Conflict
            }
            OrchestratorError::NoItems | OrchestratorError::InvalidPaymentMethod(_) => {
                ErrorKind::InvalidInput
            }
            OrchestratorError::InventoryUnavailable(GatewayError::InvalidResponse(_))
            | OrchestratorError::PaymentResponseInvalid(_) => {
                ErrorKind::CollaboratorResponseInvalid
            }
            OrchestratorError::InventoryUnavailable(_)
            | OrchestratorError::PaymentUnavailable(_)
            | OrchestratorError::PaymentFailed(_) => ErrorKind::CollaboratorUnavailable,
            OrchestratorError::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for OrchestratorError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(order_id) => OrchestratorError::NotFound(order_id),
            other => OrchestratorError::Store(other),
        }
    }
}

impl From<OrderError> for OrchestratorError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidStateTransition {
                current_status,
                action,
            } => OrchestratorError::Conflict {
                current_status,
                action,
            },
            OrderError::NoItems => OrchestratorError::NoItems,
            OrderError::InvalidPaymentMethod(raw) => OrchestratorError::InvalidPaymentMethod(raw),
        }
    }
}

fn join(ids: &[ItemId]) -> String {
    ids.iter()
        .map(ItemId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience type alias for orchestrator results.
pub type Result<T> = std::result::Result<T, OrchestratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_becomes_order_not_found() {
        let order_id = OrderId::new();
        let err = OrchestratorError::from(StoreError::NotFound(order_id));
        assert!(matches!(err, OrchestratorError::NotFound(id) if id == order_id));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_store_already_exists_is_internal() {
        let err = OrchestratorError::from(StoreError::AlreadyExists(OrderId::new()));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_invalid_transition_is_conflict() {
        let err = OrchestratorError::from(OrderError::InvalidStateTransition {
            current_status: OrderStatus::Paid,
            action: "cancel",
        });
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(
            err.to_string(),
            "Conflict: cannot cancel an order in PAID status"
        );
    }

    #[test]
    fn test_items_not_found_lists_missing() {
        let err = OrchestratorError::ItemsNotFound {
            missing: vec!["x".into(), "y".into()],
        };
        assert_eq!(err.to_string(), "Items not found: x, y");
    }

    #[test]
    fn test_collaborator_kinds() {
        let down = GatewayError::Unavailable("down".to_string());
        let garbled = GatewayError::InvalidResponse("eof".to_string());

        assert_eq!(
            OrchestratorError::InventoryUnavailable(down.clone()).kind(),
            ErrorKind::CollaboratorUnavailable
        );
        assert_eq!(
            OrchestratorError::InventoryUnavailable(garbled).kind(),
            ErrorKind::CollaboratorResponseInvalid
        );
        assert_eq!(
            OrchestratorError::PaymentUnavailable(down).kind(),
            ErrorKind::CollaboratorUnavailable
        );
        assert_eq!(
            OrchestratorError::PaymentResponseInvalid("bad".to_string()).kind(),
            ErrorKind::CollaboratorResponseInvalid
        );
    }

    #[test]
    fn test_input_kinds() {
        assert_eq!(OrchestratorError::NoItems.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            OrchestratorError::InvalidPaymentMethod("BTC".to_string()).kind(),
            ErrorKind::InvalidInput
        );
    }
}
