use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use domain::Order;
use tokio::sync::RwLock;

use crate::{OrderStore, Result, StoreError};

/// In-memory order store.
///
/// Orders live in a single map behind a reader/writer lock, so concurrent
/// `get` calls proceed in parallel while `create` and `update` are exclusive.
/// Nothing survives a restart.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: Order) -> Result<OrderId> {
        let order_id = order.order_id();
        let mut orders = self.orders.write().await;

        if orders.contains_key(&order_id) {
            return Err(StoreError::AlreadyExists(order_id));
        }

        orders.insert(order_id, order);
        tracing::debug!(%order_id, "order stored");
        Ok(order_id)
    }

    async fn get(&self, order_id: OrderId) -> Result<Order> {
        let orders = self.orders.read().await;
        orders
            .get(&order_id)
            .cloned()
            .ok_or(StoreError::NotFound(order_id))
    }

    async fn update(&self, order: Order) -> Result<()> {
        let order_id = order.order_id();
        let mut orders = self.orders.write().await;

        let slot = orders
            .get_mut(&order_id)
            .ok_or(StoreError::NotFound(order_id))?;
        *slot = order;
        Ok(())
    }
}
