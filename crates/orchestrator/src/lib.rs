//! Order orchestration for the order service.
//!
//! The orchestrator owns every business rule of the order lifecycle:
//! 1. Price a new order through the inventory collaborator and store it
//! 2. Pay a pending order through the payment collaborator
//! 3. Cancel a pending order
//!
//! Read-modify-write sequences run inside a single write section so that
//! concurrent pay/cancel calls on the same order never interleave.

pub mod error;
pub mod orchestrator;
pub mod strategy;

pub use error::{ErrorKind, OrchestratorError, Result};
pub use orchestrator::{OrderOrchestrator, PlacedOrder};
pub use strategy::{PaymentStrategy, UnknownPaymentStrategy};
