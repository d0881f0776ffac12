//! HTTP API server with observability for the order service.
//!
//! Exposes the order lifecycle (create, get, pay, cancel) as REST endpoints,
//! with structured logging (tracing) and Prometheus metrics. Handlers only
//! translate between HTTP and the orchestrator.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use gateways::{
    GatewayError, HttpInventoryGateway, HttpPaymentGateway, InventoryGateway, PaymentGateway,
};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::InMemoryOrderStore;
use orchestrator::{OrderOrchestrator, PaymentStrategy};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use config::Config;
use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
///
/// A request still running after `request_timeout` is dropped and answered
/// with 504; dropping it cancels any collaborator call it was waiting on.
/// A panicking handler is answered with 500.
pub fn create_app(
    state: Arc<AppState>,
    metrics_handle: PrometheusHandle,
    request_timeout: Duration,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    let orders = Router::new()
        .route("/orders", post(routes::orders::create))
        .route("/orders/{order_uuid}", get(routes::orders::get))
        .route("/orders/{order_uuid}/pay", post(routes::orders::pay))
        .route("/orders/{order_uuid}/cancel", post(routes::orders::cancel));

    Router::new()
        .route("/health", get(routes::health::check))
        .nest("/api/v1", orders)
        .with_state(state)
        .merge(metrics_router)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            request_timeout,
        ))
        .layer(CatchPanicLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state over an empty in-memory order store.
pub fn create_state(
    inventory: Arc<dyn InventoryGateway>,
    payment: Arc<dyn PaymentGateway>,
    strategy: PaymentStrategy,
) -> Arc<AppState> {
    let orchestrator = OrderOrchestrator::new(InMemoryOrderStore::new(), inventory, payment)
        .with_payment_strategy(strategy);
    Arc::new(AppState { orchestrator })
}

/// Creates application state talking to the collaborators named in `config`.
pub fn create_state_from_config(config: &Config) -> Result<Arc<AppState>, GatewayError> {
    let inventory =
        HttpInventoryGateway::new(config.inventory_url.as_str(), config.collaborator_timeout)?;
    let payment = HttpPaymentGateway::new(config.payment_url.as_str(), config.collaborator_timeout)?;

    Ok(create_state(
        Arc::new(inventory),
        Arc::new(payment),
        config.payment_strategy,
    ))
}
