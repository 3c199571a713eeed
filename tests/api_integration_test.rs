//! Integration tests for the finance service client.
//!
//! These run the reqwest-backed client against a local mock server and
//! verify:
//! - Request paths, headers and JSON bodies
//! - Response decoding
//! - Error classification (status, payload, transport)
//! - The full screen flow through `App`

use finwatch::api::{ApiError, FinanceApi, ReqwestHttpClient};
use finwatch::app::{App, RequestState};
use finwatch::config::{ApiConfig, Config, PushConfig};
use finwatch::push::{AuthorizationStatus, LocalPushMessaging};
use finwatch::types::{sample_expenses, sample_transactions, Screen};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(base: &str, notify: &str) -> FinanceApi {
    let config = ApiConfig::default().with_overrides(Some(base.into()), Some(notify.into()));
    FinanceApi::new(Arc::new(ReqwestHttpClient::new()), &config)
}

#[tokio::test]
async fn test_check_fraud_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/check-fraud"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "transactions": [
                { "amount": 500.0, "location": { "lat": 40.7128, "lon": -74.0060 } },
                { "amount": 2000.0, "location": { "lat": 35.6895, "lon": 139.6917 } }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "fraudDetected": true })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server.uri(), &server.uri());
    assert!(api.check_fraud(sample_transactions()).await.unwrap());
}

#[tokio::test]
async fn test_recommend_savings_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recommend-savings"))
        .and(body_json(json!({
            "income": 5000.0,
            "expenses": [
                { "amount": 1500.0, "category": "Rent" },
                { "amount": 500.0, "category": "Utilities" },
                { "amount": 300.0, "category": "Groceries" }
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "recommendedSavings": 433.33 })),
        )
        .mount(&server)
        .await;

    let api = api_for(&server.uri(), &server.uri());
    let amount = api.recommend_savings(5000.0, sample_expenses()).await.unwrap();
    assert_eq!(amount, 433.33);
}

#[tokio::test]
async fn test_notify_goes_to_notify_host_only() {
    let api_server = MockServer::start().await;
    let notify_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/notify-low-balance"))
        .and(body_json(json!({ "balance": 50.0, "token": "device-1" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&notify_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&api_server)
        .await;

    let api = api_for(&api_server.uri(), &notify_server.uri());
    api.notify_low_balance(50.0, "device-1").await.unwrap();
}

#[tokio::test]
async fn test_notify_accepts_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/notify-low-balance"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server.uri(), &server.uri());
    assert!(api.notify_low_balance(50.0, "device-1").await.is_ok());
}

#[tokio::test]
async fn test_server_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/check-fraud"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let api = api_for(&server.uri(), &server.uri());
    match api.check_fraud(sample_transactions()).await {
        Err(ApiError::Status { status, body }) => {
            assert_eq!(status, 502);
            assert_eq!(body, "bad gateway");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_wrong_payload_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recommend-savings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "savings": "lots" })))
        .mount(&server)
        .await;

    let api = api_for(&server.uri(), &server.uri());
    let err = api
        .recommend_savings(5000.0, sample_expenses())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_host() {
    let api = api_for("http://127.0.0.1:1", "http://127.0.0.1:1");
    let err = api.check_fraud(sample_transactions()).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn test_savings_screen_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recommend-savings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "recommendedSavings": 433.33 })),
        )
        .mount(&server)
        .await;

    let api = api_for(&server.uri(), &server.uri());
    let messaging = LocalPushMessaging::from_config(&PushConfig {
        permission: AuthorizationStatus::Denied,
        device_token: None,
    });
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(Config::default(), api, Arc::new(messaging), tx);

    app.select_screen(Screen::Savings);
    assert!(app.get_savings_recommendation());

    let event = rx.recv().await.unwrap();
    app.handle_event(event);

    assert_eq!(app.savings.recommendation, RequestState::Succeeded(433.33));
    assert!(app.alerts.is_empty());
}
