//! Order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{ItemId, OrderId, UserId};
use domain::Order;
use gateways::{InventoryGateway, PaymentGateway};
use order_store::InMemoryOrderStore;
use orchestrator::OrderOrchestrator;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Orchestrator wired with boxed collaborators, so production and in-memory
/// gateways share one state type.
pub type Orchestrator =
    OrderOrchestrator<InMemoryOrderStore, Arc<dyn InventoryGateway>, Arc<dyn PaymentGateway>>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub orchestrator: Orchestrator,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub user_uuid: String,
    pub part_uuids: Vec<String>,
}

#[derive(Deserialize)]
pub struct PayOrderRequest {
    pub payment_method: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderCreatedResponse {
    pub order_uuid: String,
    pub total_price: f64,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub order_uuid: String,
    pub user_uuid: String,
    pub part_uuids: Vec<String>,
    pub total_price: f64,
    pub transaction_uuid: Option<String>,
    pub payment_method: Option<String>,
    pub status: String,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            order_uuid: order.order_id().to_string(),
            user_uuid: order.user_id().to_string(),
            part_uuids: order.item_ids().iter().map(ToString::to_string).collect(),
            total_price: order.total_price(),
            transaction_uuid: order.transaction_id().map(|id| id.to_string()),
            payment_method: order.payment_method().map(|m| m.as_str().to_string()),
            status: order.status().as_str().to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct PayOrderResponse {
    pub transaction_uuid: String,
}

// -- Handlers --

/// POST /api/v1/orders: price and store a new order.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), ApiError> {
    let Json(req) = payload?;
    let user_id = UserId::from_uuid(parse_uuid("user_uuid", &req.user_uuid)?);
    let item_ids = req
        .part_uuids
        .iter()
        .map(|raw| parse_uuid("part_uuids", raw).map(|uuid| ItemId::new(uuid.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    let placed = state.orchestrator.create_order(user_id, item_ids).await?;

    let response = OrderCreatedResponse {
        order_uuid: placed.order_id.to_string(),
        total_price: placed.total_price,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/orders/{order_uuid}: load an order.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(order_uuid): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&order_uuid)?;
    let order = state.orchestrator.get_order(order_id).await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// POST /api/v1/orders/{order_uuid}/pay: charge a pending order.
#[tracing::instrument(skip(state, payload))]
pub async fn pay(
    State(state): State<Arc<AppState>>,
    Path(order_uuid): Path<String>,
    payload: Result<Json<PayOrderRequest>, JsonRejection>,
) -> Result<Json<PayOrderResponse>, ApiError> {
    let order_id = parse_order_id(&order_uuid)?;
    let Json(req) = payload?;

    let transaction_id = state
        .orchestrator
        .pay_order(order_id, &req.payment_method)
        .await?;

    Ok(Json(PayOrderResponse {
        transaction_uuid: transaction_id.to_string(),
    }))
}

/// POST /api/v1/orders/{order_uuid}/cancel: cancel a pending order.
#[tracing::instrument(skip(state))]
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(order_uuid): Path<String>,
) -> Result<StatusCode, ApiError> {
    let order_id = parse_order_id(&order_uuid)?;
    state.orchestrator.cancel_order(order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_order_id(raw: &str) -> Result<OrderId, ApiError> {
    parse_uuid("order_uuid", raw).map(OrderId::from_uuid)
}

fn parse_uuid(field: &str, raw: &str) -> Result<uuid::Uuid, ApiError> {
    uuid::Uuid::parse_str(raw).map_err(|e| ApiError::BadRequest(format!("Invalid {field}: {e}")))
}
