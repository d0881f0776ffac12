//! Inventory gateway trait with HTTP and in-memory implementations.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::ItemId;
use domain::ItemPrice;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};
use crate::http;

/// Prices catalog items.
#[async_trait]
pub trait InventoryGateway: Send + Sync {
    /// Returns one price record per requested item the catalog knows about.
    ///
    /// Unknown ids are silently left out; callers compare the answer with
    /// what they asked for.
    async fn list_prices(&self, item_ids: &[ItemId]) -> Result<Vec<ItemPrice>>;
}

#[async_trait]
impl<T: InventoryGateway + ?Sized> InventoryGateway for Arc<T> {
    async fn list_prices(&self, item_ids: &[ItemId]) -> Result<Vec<ItemPrice>> {
        (**self).list_prices(item_ids).await
    }
}

// -- HTTP implementation --

#[derive(Serialize)]
struct ListPartsRequest<'a> {
    filter: PartsFilter<'a>,
}

#[derive(Serialize)]
struct PartsFilter<'a> {
    uuids: &'a [ItemId],
}

#[derive(Deserialize)]
struct ListPartsResponse {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    uuid: String,
    price: f64,
}

/// Inventory gateway talking to the catalog service over JSON/HTTP.
#[derive(Clone)]
pub struct HttpInventoryGateway {
    client: Client,
    base_url: String,
}

impl HttpInventoryGateway {
    pub const LIST_PARTS_PATH: &'static str = "/api/v1/parts/list";

    /// Creates a gateway for the catalog service at `base_url`.
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
impl InventoryGateway for HttpInventoryGateway {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_prices(&self, item_ids: &[ItemId]) -> Result<Vec<ItemPrice>> {
        let url = http::endpoint(&self.base_url, Self::LIST_PARTS_PATH);
        let request = ListPartsRequest {
            filter: PartsFilter { uuids: item_ids },
        };

        let response: ListPartsResponse = http::post_json(&self.client, &url, &request)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "inventory lookup failed"))?;

        Ok(response
            .parts
            .into_iter()
            .map(|part| ItemPrice::new(part.uuid, part.price))
            .collect())
    }
}

// -- In-memory implementation --

#[derive(Debug, Default)]
struct InMemoryInventoryState {
    catalog: HashMap<ItemId, f64>,
    calls: usize,
    unavailable: bool,
}

/// In-memory inventory gateway for testing and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryGateway {
    state: Arc<RwLock<InMemoryInventoryState>>,
}

impl InMemoryInventoryGateway {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the given `(item, unit price)` pairs.
    pub fn with_items<I, K>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<ItemId>,
    {
        let gateway = Self::new();
        for (item_id, price) in items {
            gateway.insert(item_id, price);
        }
        gateway
    }

    /// Adds or reprices a catalog item.
    pub fn insert(&self, item_id: impl Into<ItemId>, unit_price: f64) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .catalog
            .insert(item_id.into(), unit_price);
    }

    /// Makes every subsequent lookup fail as if the service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .unavailable = unavailable;
    }

    /// Returns how many lookups were made.
    pub fn call_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
    }
}

#[async_trait]
impl InventoryGateway for InMemoryInventoryGateway {
    async fn list_prices(&self, item_ids: &[ItemId]) -> Result<Vec<ItemPrice>> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.calls += 1;

        if state.unavailable {
            return Err(GatewayError::Unavailable(
                "inventory service unreachable".to_string(),
            ));
        }

        // The catalog filters by id set, so repeated ids yield one record.
        let mut seen = HashSet::new();
        Ok(item_ids
            .iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| {
                state
                    .catalog
                    .get(id)
                    .map(|price| ItemPrice::new(id.clone(), *price))
            })
            .collect())
    }
}
