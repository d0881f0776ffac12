//! Value objects for the order domain.

use std::str::FromStr;

use common::ItemId;
use serde::{Deserialize, Serialize};

use super::OrderError;

/// How the user pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Sbp,
    CreditCard,
    InvestorMoney,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Card,
        PaymentMethod::Sbp,
        PaymentMethod::CreditCard,
        PaymentMethod::InvestorMoney,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::Sbp => "SBP",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::InvestorMoney => "INVESTOR_MONEY",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| OrderError::InvalidPaymentMethod(s.to_string()))
    }
}

/// Unit price of a catalog item as reported by the inventory collaborator.
///
/// Only used while pricing a new order; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPrice {
    pub item_id: ItemId,
    pub unit_price: f64,
}

impl ItemPrice {
    pub fn new(item_id: impl Into<ItemId>, unit_price: f64) -> Self {
        Self {
            item_id: item_id.into(),
            unit_price,
        }
    }
}
