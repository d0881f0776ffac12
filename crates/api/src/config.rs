//! Application configuration loaded from environment variables.

use std::time::Duration;

use orchestrator::PaymentStrategy;
use thiserror::Error;

/// A variable was set to a value that could not be parsed.
#[derive(Debug, Error)]
#[error("invalid value {value:?} for {name}: {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3080`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `INVENTORY_URL`: inventory service base URL (default: `"http://localhost:8080"`)
/// - `PAYMENT_URL`: payment service base URL (default: `"http://localhost:8081"`)
/// - `COLLABORATOR_TIMEOUT_MS`: per-request deadline for both services (default: `5000`)
/// - `PAYMENT_STRATEGY`: `exclusive` or `optimistic` (default: `exclusive`)
/// - `REQUEST_TIMEOUT_MS`: deadline for a whole HTTP request (default: `10000`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub inventory_url: String,
    pub payment_url: String,
    pub collaborator_timeout: Duration,
    pub payment_strategy: PaymentStrategy,
    pub request_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults
    /// for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which returns the raw value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => parse_var("PORT", raw)?,
            None => defaults.port,
        };
        let collaborator_timeout = match lookup("COLLABORATOR_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(parse_var("COLLABORATOR_TIMEOUT_MS", raw)?),
            None => defaults.collaborator_timeout,
        };
        let payment_strategy = match lookup("PAYMENT_STRATEGY") {
            Some(raw) => parse_var("PAYMENT_STRATEGY", raw)?,
            None => defaults.payment_strategy,
        };
        let request_timeout = match lookup("REQUEST_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(parse_var("REQUEST_TIMEOUT_MS", raw)?),
            None => defaults.request_timeout,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            inventory_url: lookup("INVENTORY_URL").unwrap_or(defaults.inventory_url),
            payment_url: lookup("PAYMENT_URL").unwrap_or(defaults.payment_url),
            collaborator_timeout,
            payment_strategy,
            request_timeout,
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3080,
            log_level: "info".to_string(),
            inventory_url: "http://localhost:8080".to_string(),
            payment_url: "http://localhost:8081".to_string(),
            collaborator_timeout: Duration::from_millis(5000),
            payment_strategy: PaymentStrategy::Exclusive,
            request_timeout: Duration::from_millis(10_000),
        }
    }
}

fn parse_var<T>(name: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError {
        name,
        reason: e.to_string(),
        value: raw,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3080);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.inventory_url, "http://localhost:8080");
        assert_eq!(config.payment_url, "http://localhost:8081");
        assert_eq!(config.collaborator_timeout, Duration::from_secs(5));
        assert_eq!(config.payment_strategy, PaymentStrategy::Exclusive);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_unset_variables_use_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:3080");
        assert_eq!(config.payment_strategy, PaymentStrategy::Exclusive);
    }

    #[test]
    fn test_reads_every_variable() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("RUST_LOG", "debug"),
            ("INVENTORY_URL", "http://inventory:50051"),
            ("PAYMENT_URL", "http://payment:50052"),
            ("COLLABORATOR_TIMEOUT_MS", "250"),
            ("PAYMENT_STRATEGY", "Optimistic"),
            ("REQUEST_TIMEOUT_MS", "1500"),
        ])
        .unwrap();

        assert_eq!(config.addr(), "127.0.0.1:9000");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.inventory_url, "http://inventory:50051");
        assert_eq!(config.payment_url, "http://payment:50052");
        assert_eq!(config.collaborator_timeout, Duration::from_millis(250));
        assert_eq!(config.payment_strategy, PaymentStrategy::Optimistic);
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = load(&[("PORT", "http")]).unwrap_err();
        assert_eq!(err.name, "PORT");
        assert_eq!(err.value, "http");
    }

    #[test]
    fn test_invalid_request_timeout_is_rejected() {
        let err = load(&[("REQUEST_TIMEOUT_MS", "-1")]).unwrap_err();
        assert_eq!(err.name, "REQUEST_TIMEOUT_MS");
    }

    #[test]
    fn test_invalid_strategy_is_rejected() {
        let err = load(&[("PAYMENT_STRATEGY", "eventual")]).unwrap_err();
        assert_eq!(err.name, "PAYMENT_STRATEGY");
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }
}
