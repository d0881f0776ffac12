//! Order orchestrator driving the order lifecycle.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use common::{ItemId, OrderId, TransactionId, UserId};
use domain::{ItemPrice, Order, PaymentMethod};
use gateways::{ChargeRequest, GatewayError, InventoryGateway, PaymentGateway};
use order_store::OrderStore;
use tokio::sync::Mutex;

use crate::error::{OrchestratorError, Result};
use crate::strategy::PaymentStrategy;

/// Outcome of a successful order creation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub total_price: f64,
}

/// Owns the order business rules on top of the store and both collaborators.
///
/// `get_order` reads straight through the store. `cancel_order` and
/// `pay_order` run their read-modify-write inside one process-wide write
/// section, so the loser of a pay/cancel race observes the winner's result.
pub struct OrderOrchestrator<S, I, P>
where
    S: OrderStore,
    I: InventoryGateway,
    P: PaymentGateway,
{
    store: S,
    inventory: I,
    payment: P,
    strategy: PaymentStrategy,
    write_section: Mutex<()>,
}

impl<S, I, P> OrderOrchestrator<S, I, P>
where
    S: OrderStore,
    I: InventoryGateway,
    P: PaymentGateway,
{
    /// Creates an orchestrator using the exclusive payment strategy.
    pub fn new(store: S, inventory: I, payment: P) -> Self {
        Self {
            store,
            inventory,
            payment,
            strategy: PaymentStrategy::default(),
            write_section: Mutex::new(()),
        }
    }

    pub fn with_payment_strategy(mut self, strategy: PaymentStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn payment_strategy(&self) -> PaymentStrategy {
        self.strategy
    }

    /// Prices the requested items and stores a new order awaiting payment.
    ///
    /// Every requested item must be known to the inventory; a repeated id is
    /// charged once per occurrence.
    #[tracing::instrument(skip(self, item_ids), fields(items = item_ids.len()))]
    pub async fn create_order(&self, user_id: UserId, item_ids: Vec<ItemId>) -> Result<PlacedOrder> {
        self.place(user_id, item_ids)
            .await
            .inspect_err(|e| record_failure("create_order", e))
    }

    /// Loads an order by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order> {
        Ok(self.store.get(order_id).await?)
    }

    /// Cancels an order awaiting payment.
    ///
    /// Cancelling an already cancelled order succeeds without change; a paid
    /// order cannot be cancelled.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<()> {
        self.cancel(order_id)
            .await
            .inspect_err(|e| record_failure("cancel_order", e))
    }

    /// Pays an order awaiting payment and returns the transaction id.
    ///
    /// On any failure the order is left as it was, so retrying is safe as
    /// long as the caller checks the order status first: the collaborator's
    /// charge itself is not guaranteed to be idempotent.
    #[tracing::instrument(skip(self), fields(strategy = %self.strategy))]
    pub async fn pay_order(&self, order_id: OrderId, payment_method: &str) -> Result<TransactionId> {
        let result = match self.strategy {
            PaymentStrategy::Exclusive => self.pay_exclusive(order_id, payment_method).await,
            PaymentStrategy::Optimistic => self.pay_optimistic(order_id, payment_method).await,
        };
        result.inspect_err(|e| record_failure("pay_order", e))
    }

    async fn place(&self, user_id: UserId, item_ids: Vec<ItemId>) -> Result<PlacedOrder> {
        if item_ids.is_empty() {
            return Err(OrchestratorError::NoItems);
        }

        let prices = self
            .inventory
            .list_prices(&item_ids)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "inventory lookup failed");
                OrchestratorError::InventoryUnavailable(e)
            })?;
        let total_price = total_for(&item_ids, &prices)?;

        let order = Order::place(user_id, item_ids, total_price)?;
        let order_id = self.store.create(order).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(%order_id, %user_id, total_price, "order created");

        Ok(PlacedOrder {
            order_id,
            total_price,
        })
    }

    async fn cancel(&self, order_id: OrderId) -> Result<()> {
        let _section = self.write_section.lock().await;

        let mut order = self.store.get(order_id).await?;
        if !order.cancel()? {
            tracing::debug!(%order_id, "order already cancelled");
            return Ok(());
        }
        self.store.update(order).await?;

        metrics::counter!("orders_cancelled_total").increment(1);
        tracing::info!(%order_id, "order cancelled");
        Ok(())
    }

    async fn pay_exclusive(&self, order_id: OrderId, payment_method: &str) -> Result<TransactionId> {
        let _section = self.write_section.lock().await;

        let mut order = self.store.get(order_id).await?;
        let method: PaymentMethod = payment_method.parse()?;
        order.ensure_payable()?;

        let transaction_id = self.charge(&order, method).await?;

        order.mark_paid(transaction_id, method)?;
        self.store.update(order).await?;

        record_paid(order_id, transaction_id, method);
        Ok(transaction_id)
    }

    async fn pay_optimistic(&self, order_id: OrderId, payment_method: &str) -> Result<TransactionId> {
        let snapshot = self.store.get(order_id).await?;
        let method: PaymentMethod = payment_method.parse()?;
        snapshot.ensure_payable()?;

        let transaction_id = self.charge(&snapshot, method).await?;

        let _section = self.write_section.lock().await;
        let mut order = self.store.get(order_id).await?;
        if !order.status().can_pay() {
            tracing::warn!(
                %order_id,
                %transaction_id,
                status = %order.status(),
                "order changed while being charged, payment not recorded"
            );
            return Err(OrchestratorError::ChargeConflict {
                current_status: order.status(),
                transaction_id,
            });
        }

        order.mark_paid(transaction_id, method)?;
        self.store.update(order).await?;

        record_paid(order_id, transaction_id, method);
        Ok(transaction_id)
    }

    /// Charges the order and validates the transaction id handed back.
    async fn charge(&self, order: &Order, method: PaymentMethod) -> Result<TransactionId> {
        let request = ChargeRequest {
            order_id: order.order_id(),
            user_id: order.user_id(),
            method,
        };

        let started = Instant::now();
        let result = self.payment.charge(request).await;
        metrics::histogram!("payment_charge_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        let receipt = result.map_err(|e| {
            tracing::warn!(order_id = %order.order_id(), error = %e, "payment charge failed");
            match e {
                GatewayError::Rejected { .. } => OrchestratorError::PaymentFailed(e),
                GatewayError::InvalidResponse(msg) => {
                    OrchestratorError::PaymentResponseInvalid(msg)
                }
                GatewayError::Unavailable(_) => OrchestratorError::PaymentUnavailable(e),
            }
        })?;

        TransactionId::parse(&receipt.transaction_id).map_err(|e| {
            OrchestratorError::PaymentResponseInvalid(format!(
                "malformed transaction id {:?}: {e}",
                receipt.transaction_id
            ))
        })
    }
}

/// Sums the unit price of every requested occurrence.
///
/// Fails with the ids the inventory did not price, in request order.
fn total_for(requested: &[ItemId], prices: &[ItemPrice]) -> Result<f64> {
    let by_id: HashMap<&ItemId, f64> = prices
        .iter()
        .map(|price| (&price.item_id, price.unit_price))
        .collect();

    let mut seen = HashSet::new();
    let missing: Vec<ItemId> = requested
        .iter()
        .filter(|id| !by_id.contains_key(id) && seen.insert(*id))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(OrchestratorError::ItemsNotFound { missing });
    }

    Ok(requested.iter().map(|id| by_id[id]).sum())
}

fn record_paid(order_id: OrderId, transaction_id: TransactionId, method: PaymentMethod) {
    metrics::counter!("orders_paid_total").increment(1);
    tracing::info!(%order_id, %transaction_id, %method, "order paid");
}

fn record_failure(operation: &'static str, err: &OrchestratorError) {
    metrics::counter!(
        "order_operation_failures_total",
        "operation" => operation,
        "kind" => err.kind().as_str()
    )
    .increment(1);
}
