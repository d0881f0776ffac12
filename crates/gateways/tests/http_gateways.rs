//! Tests for the HTTP gateways against a mocked collaborator.

use std::time::Duration;

use common::{ItemId, OrderId, UserId};
use domain::{ItemPrice, PaymentMethod};
use gateways::{
    ChargeRequest, GatewayError, HttpInventoryGateway, HttpPaymentGateway, InventoryGateway,
    PaymentGateway,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(2);

fn inventory(server: &MockServer) -> HttpInventoryGateway {
    HttpInventoryGateway::new(server.uri(), TIMEOUT).unwrap()
}

fn payment(server: &MockServer) -> HttpPaymentGateway {
    HttpPaymentGateway::new(server.uri(), TIMEOUT).unwrap()
}

#[tokio::test]
async fn inventory_sends_id_filter_and_maps_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HttpInventoryGateway::LIST_PARTS_PATH))
        .and(body_json(json!({ "filter": { "uuids": ["a", "b", "a"] } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "parts": [
                { "uuid": "a", "name": "star", "price": 100.0 },
                { "uuid": "b", "name": "wing", "price": 50.0 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ids = vec![ItemId::from("a"), ItemId::from("b"), ItemId::from("a")];
    let prices = inventory(&server).list_prices(&ids).await.unwrap();

    assert_eq!(
        prices,
        vec![ItemPrice::new("a", 100.0), ItemPrice::new("b", 50.0)]
    );
}

#[tokio::test]
async fn inventory_missing_parts_field_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HttpInventoryGateway::LIST_PARTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let prices = inventory(&server)
        .list_prices(&[ItemId::from("a")])
        .await
        .unwrap();

    assert!(prices.is_empty());
}

#[tokio::test]
async fn inventory_server_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HttpInventoryGateway::LIST_PARTS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let result = inventory(&server).list_prices(&[ItemId::from("a")]).await;

    assert!(matches!(result, Err(GatewayError::Unavailable(_))));
}

#[tokio::test]
async fn inventory_unreachable_is_unavailable() {
    let gateway = HttpInventoryGateway::new("http://127.0.0.1:9", TIMEOUT).unwrap();

    let result = gateway.list_prices(&[ItemId::from("a")]).await;

    assert!(matches!(result, Err(GatewayError::Unavailable(_))));
}

#[tokio::test]
async fn payment_sends_wire_method_and_returns_transaction() {
    let server = MockServer::start().await;
    let order_id = OrderId::new();
    let user_id = UserId::new();

    Mock::given(method("POST"))
        .and(path(HttpPaymentGateway::PAY_ORDER_PATH))
        .and(body_json(json!({
            "order_uuid": order_id.to_string(),
            "user_uuid": user_id.to_string(),
            "payment_method": "PAYMENT_METHOD_CREDIT_CARD"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transaction_uuid": "5f0c6a0e-3b52-4b7e-9f1b-4a1f4f3c9e21"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = payment(&server)
        .charge(ChargeRequest {
            order_id,
            user_id,
            method: PaymentMethod::CreditCard,
        })
        .await
        .unwrap();

    assert_eq!(
        receipt.transaction_id,
        "5f0c6a0e-3b52-4b7e-9f1b-4a1f4f3c9e21"
    );
}

#[tokio::test]
async fn payment_client_error_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HttpPaymentGateway::PAY_ORDER_PATH))
        .respond_with(ResponseTemplate::new(402).set_body_string("insufficient funds"))
        .mount(&server)
        .await;

    let result = payment(&server)
        .charge(ChargeRequest {
            order_id: OrderId::new(),
            user_id: UserId::new(),
            method: PaymentMethod::Card,
        })
        .await;

    assert_eq!(
        result,
        Err(GatewayError::Rejected {
            status: 402,
            message: "insufficient funds".to_string(),
        })
    );
}

#[tokio::test]
async fn payment_undecodable_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HttpPaymentGateway::PAY_ORDER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let result = payment(&server)
        .charge(ChargeRequest {
            order_id: OrderId::new(),
            user_id: UserId::new(),
            method: PaymentMethod::Sbp,
        })
        .await;

    assert!(matches!(result, Err(GatewayError::InvalidResponse(_))));
}

#[tokio::test]
async fn payment_deadline_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HttpPaymentGateway::PAY_ORDER_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "transaction_uuid": "x" }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let gateway = HttpPaymentGateway::new(server.uri(), Duration::from_millis(50)).unwrap();
    let result = gateway
        .charge(ChargeRequest {
            order_id: OrderId::new(),
            user_id: UserId::new(),
            method: PaymentMethod::Card,
        })
        .await;

    assert!(matches!(result, Err(GatewayError::Unavailable(_))));
}
