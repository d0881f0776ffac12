//! Payment gateway trait with HTTP and in-memory implementations.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::{OrderId, TransactionId, UserId};
use domain::PaymentMethod;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};
use crate::http;

/// A request to charge an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub method: PaymentMethod,
}

/// The collaborator's answer to a successful charge.
///
/// The transaction id is passed through as received; callers validate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeReceipt {
    pub transaction_id: String,
}

/// Charges orders.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charges the user for the order with the given method.
    ///
    /// A charge is not guaranteed to be idempotent on the collaborator side.
    async fn charge(&self, request: ChargeRequest) -> Result<ChargeReceipt>;
}

#[async_trait]
impl<T: PaymentGateway + ?Sized> PaymentGateway for Arc<T> {
    async fn charge(&self, request: ChargeRequest) -> Result<ChargeReceipt> {
        (**self).charge(request).await
    }
}

/// Translates a payment method into the payment collaborator's vocabulary.
pub fn wire_payment_method(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Card => "PAYMENT_METHOD_CARD",
        PaymentMethod::Sbp => "PAYMENT_METHOD_SBP",
        PaymentMethod::CreditCard => "PAYMENT_METHOD_CREDIT_CARD",
        PaymentMethod::InvestorMoney => "PAYMENT_METHOD_INVESTOR_MONEY",
    }
}

// -- HTTP implementation --

#[derive(Serialize)]
struct PayOrderRequest {
    order_uuid: String,
    user_uuid: String,
    payment_method: &'static str,
}

#[derive(Deserialize)]
struct PayOrderResponse {
    transaction_uuid: String,
}

/// Payment gateway talking to the payment service over JSON/HTTP.
#[derive(Clone)]
pub struct HttpPaymentGateway {
    client: Client,
    base_url: String,
}

impl HttpPaymentGateway {
    pub const PAY_ORDER_PATH: &'static str = "/api/v1/payments";

    /// Creates a gateway for the payment service at `base_url`.
    ///
    /// `timeout` bounds every request; it is a deadline, not a retry policy.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http::build_client(timeout)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn charge(&self, request: ChargeRequest) -> Result<ChargeReceipt> {
        let url = http::endpoint(&self.base_url, Self::PAY_ORDER_PATH);
        let body = PayOrderRequest {
            order_uuid: request.order_id.to_string(),
            user_uuid: request.user_id.to_string(),
            payment_method: wire_payment_method(request.method),
        };

        let response: PayOrderResponse = http::post_json(&self.client, &url, &body)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "payment charge failed"))?;

        Ok(ChargeReceipt {
            transaction_id: response.transaction_uuid,
        })
    }
}

// -- In-memory implementation --

#[derive(Debug, Clone)]
enum ChargeOutcome {
    Succeed,
    Unavailable,
    Decline,
    TransactionId(String),
}

#[derive(Debug)]
struct InMemoryPaymentState {
    charges: Vec<(ChargeRequest, String)>,
    outcome: ChargeOutcome,
    delay: Option<Duration>,
}

impl Default for InMemoryPaymentState {
    fn default() -> Self {
        Self {
            charges: Vec::new(),
            outcome: ChargeOutcome::Succeed,
            delay: None,
        }
    }
}

/// In-memory payment gateway for testing and local runs.
///
/// Issues a fresh UUID transaction id per successful charge.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentGateway {
    /// Creates a new in-memory payment gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent charges fail as if the service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.set_outcome(if unavailable {
            ChargeOutcome::Unavailable
        } else {
            ChargeOutcome::Succeed
        });
    }

    /// Makes subsequent charges be declined.
    pub fn set_decline(&self, decline: bool) {
        self.set_outcome(if decline {
            ChargeOutcome::Decline
        } else {
            ChargeOutcome::Succeed
        });
    }

    /// Makes subsequent charges succeed with this exact transaction id.
    pub fn respond_with_transaction_id(&self, raw: impl Into<String>) {
        self.set_outcome(ChargeOutcome::TransactionId(raw.into()));
    }

    /// Delays every charge, simulating a slow network round trip.
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.write().delay = delay;
    }

    /// Returns the number of charges that went through.
    pub fn charge_count(&self) -> usize {
        self.read().charges.len()
    }

    /// Returns the charges that went through with the transaction id issued.
    pub fn charges(&self) -> Vec<(ChargeRequest, String)> {
        self.read().charges.clone()
    }

    fn set_outcome(&self, outcome: ChargeOutcome) {
        self.write().outcome = outcome;
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, InMemoryPaymentState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, InMemoryPaymentState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn charge(&self, request: ChargeRequest) -> Result<ChargeReceipt> {
        let delay = self.read().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.write();
        let transaction_id = match &state.outcome {
            ChargeOutcome::Succeed => TransactionId::new().to_string(),
            ChargeOutcome::TransactionId(raw) => raw.clone(),
            ChargeOutcome::Unavailable => {
                return Err(GatewayError::Unavailable(
                    "payment service unreachable".to_string(),
                ));
            }
            ChargeOutcome::Decline => {
                return Err(GatewayError::Rejected {
                    status: 402,
                    message: "payment declined".to_string(),
                });
            }
        };

        state.charges.push((request, transaction_id.clone()));
        Ok(ChargeReceipt { transaction_id })
    }
}
