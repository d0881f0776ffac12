//! Order storage for the order service.
//!
//! The store is the only owner of order records. Callers go through the
//! `OrderStore` operations, each of which is atomic on its own.

pub mod error;
pub mod memory;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryOrderStore;
pub use store::OrderStore;
