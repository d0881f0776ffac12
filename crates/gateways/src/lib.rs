//! Gateways to the order service's remote collaborators.
//!
//! Each collaborator is reached through a narrow capability trait:
//! - `InventoryGateway` prices a set of catalog items
//! - `PaymentGateway` charges an order
//!
//! Both come with an HTTP implementation for production and an in-memory
//! implementation for tests and local runs.

pub mod error;
mod http;
pub mod inventory;
pub mod payment;

pub use error::{GatewayError, Result};
pub use inventory::{HttpInventoryGateway, InMemoryInventoryGateway, InventoryGateway};
pub use payment::{
    ChargeReceipt, ChargeRequest, HttpPaymentGateway, InMemoryPaymentGateway, PaymentGateway,
    wire_payment_method,
};
