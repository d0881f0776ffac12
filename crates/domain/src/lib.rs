//! Domain layer for the order service.
//!
//! This crate provides the order data model:
//! - `Order` entity with its guarded status transitions
//! - `OrderStatus` state machine
//! - `PaymentMethod` and `ItemPrice` value objects

pub mod order;

pub use common::{ItemId, OrderId, TransactionId, UserId};
pub use order::{ItemPrice, Order, OrderError, OrderStatus, PaymentMethod};
