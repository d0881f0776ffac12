use async_trait::async_trait;
use common::OrderId;
use domain::Order;

use crate::Result;

/// Core trait for order storage.
///
/// Every single call is atomic: readers observe either the previous or the
/// new record, never a mix of fields. A `get` followed by an `update` is
/// NOT atomic; callers that read-modify-write must serialize those
/// sequences themselves.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a new order and returns its id.
    ///
    /// Fails with `AlreadyExists` if the id is already taken.
    async fn create(&self, order: Order) -> Result<OrderId>;

    /// Returns a copy of the stored order.
    async fn get(&self, order_id: OrderId) -> Result<Order>;

    /// Replaces the stored record with `order`.
    ///
    /// Fails with `NotFound` if no order with the same id exists.
    async fn update(&self, order: Order) -> Result<()>;
}
