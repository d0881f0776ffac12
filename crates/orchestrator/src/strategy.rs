//! How `pay_order` guards the payment charge.

use std::str::FromStr;

use thiserror::Error;

/// Locking discipline around the outbound payment charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStrategy {
    /// Hold the write section across read, charge and commit.
    ///
    /// Serializes all writes for the duration of the round trip.
    #[default]
    Exclusive,

    /// Validate, release the write section for the charge, then re-acquire
    /// it and commit only if the order is still awaiting payment.
    Optimistic,
}

impl PaymentStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStrategy::Exclusive => "exclusive",
            PaymentStrategy::Optimistic => "optimistic",
        }
    }
}

impl std::fmt::Display for PaymentStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown payment strategy: {0:?} (expected \"exclusive\" or \"optimistic\")")]
pub struct UnknownPaymentStrategy(pub String);

impl FromStr for PaymentStrategy {
    type Err = UnknownPaymentStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exclusive" => Ok(PaymentStrategy::Exclusive),
            "optimistic" => Ok(PaymentStrategy::Optimistic),
            _ => Err(UnknownPaymentStrategy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_exclusive() {
        assert_eq!(PaymentStrategy::default(), PaymentStrategy::Exclusive);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "exclusive".parse::<PaymentStrategy>().unwrap(),
            PaymentStrategy::Exclusive
        );
        assert_eq!(
            " Optimistic ".parse::<PaymentStrategy>().unwrap(),
            PaymentStrategy::Optimistic
        );
        assert!("eventual".parse::<PaymentStrategy>().is_err());
    }
}
