//! Order entity.

use common::{ItemId, OrderId, TransactionId, UserId};
use serde::{Deserialize, Serialize};

use super::{OrderError, OrderStatus, PaymentMethod};

/// An order placed by a user for a fixed set of priced items.
///
/// Identity, owner, items and total are fixed at placement. Only the status
/// moves afterwards, and the payment details are recorded together with the
/// single `PendingPayment -> Paid` transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    order_id: OrderId,
    user_id: UserId,
    item_ids: Vec<ItemId>,
    total_price: f64,
    status: OrderStatus,
    transaction_id: Option<TransactionId>,
    payment_method: Option<PaymentMethod>,
}

impl Order {
    /// Places a new order awaiting payment under a freshly drawn id.
    pub fn place(
        user_id: UserId,
        item_ids: Vec<ItemId>,
        total_price: f64,
    ) -> Result<Self, OrderError> {
        if item_ids.is_empty() {
            return Err(OrderError::NoItems);
        }

        Ok(Self {
            order_id: OrderId::new(),
            user_id,
            item_ids,
            total_price,
            status: OrderStatus::PendingPayment,
            transaction_id: None,
            payment_method: None,
        })
    }
}

// Query methods
impl Order {
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Item ids in request order, duplicates included.
    pub fn item_ids(&self) -> &[ItemId] {
        &self.item_ids
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn transaction_id(&self) -> Option<TransactionId> {
        self.transaction_id
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }
}

// Transitions
impl Order {
    /// Checks that the order may still be paid.
    pub fn ensure_payable(&self) -> Result<(), OrderError> {
        if !self.status.can_pay() {
            return Err(OrderError::InvalidStateTransition {
                current_status: self.status,
                action: "pay",
            });
        }
        Ok(())
    }

    /// Records a successful payment.
    pub fn mark_paid(
        &mut self,
        transaction_id: TransactionId,
        payment_method: PaymentMethod,
    ) -> Result<(), OrderError> {
        self.ensure_payable()?;

        self.status = OrderStatus::Paid;
        self.transaction_id = Some(transaction_id);
        self.payment_method = Some(payment_method);
        Ok(())
    }

    /// Cancels the order.
    ///
    /// Returns `Ok(false)` when the order was already cancelled, in which
    /// case nothing changed.
    pub fn cancel(&mut self) -> Result<bool, OrderError> {
        if !self.status.can_cancel() {
            return Err(OrderError::InvalidStateTransition {
                current_status: self.status,
                action: "cancel",
            });
        }
        if self.status == OrderStatus::Cancelled {
            return Ok(false);
        }

        self.status = OrderStatus::Cancelled;
        Ok(true)
    }
}
