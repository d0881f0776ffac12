//! Shared JSON-over-HTTP plumbing for the production gateways.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{GatewayError, Result};

pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| GatewayError::Unavailable(format!("failed to build HTTP client: {e}")))
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Posts `body` as JSON and decodes a JSON answer.
///
/// Transport failures and 5xx map to `Unavailable`, 4xx to `Rejected`.
pub(crate) async fn post_json<B, R>(client: &Client, url: &str, body: &B) -> Result<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return response
            .json::<R>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()));
    }

    let message = response.text().await.unwrap_or_default();
    if status.is_client_error() {
        Err(GatewayError::Rejected {
            status: status.as_u16(),
            message,
        })
    } else {
        Err(GatewayError::Unavailable(format!("{status}: {message}")))
    }
}
