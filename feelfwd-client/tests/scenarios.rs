//! End-to-end client scenarios against a mock API.

use std::sync::Arc;
use std::time::{Duration, Instant};

use feelfwd_client::{ApiClient, ErrorKind, NoopReporter, RetryPolicy};
use feelfwd_core::{FactorsRequest, HealthResponse, Preference, PreferencesRequest};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(base_url: &str) -> ApiClient {
    ApiClient::builder()
        .base_url(base_url)
        .timeout(Duration::from_millis(300))
        .retry_policy(
            RetryPolicy::default()
                .with_base_delay(Duration::from_millis(10))
                .with_max_delay(Duration::from_millis(100))
                .with_jitter(Duration::from_millis(5)),
        )
        .reporter(Arc::new(NoopReporter))
        .build()
        .unwrap()
}

#[tokio::test]
async fn scenario_a_rate_limited_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/phase0/factors"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/phase0/factors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"factors": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server.uri());
    let response = client
        .get_factors(&FactorsRequest::new("x"))
        .await
        .unwrap();

    assert!(response.factors.is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
    assert!(client.is_api_healthy());
}

#[tokio::test]
async fn scenario_b_server_always_failing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/phase0/factors"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client(&server.uri());
    let err = client
        .get_factors(&FactorsRequest::new("x"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn scenario_c_health_check_unreachable() {
    let client = client("http://127.0.0.1:1");

    let response = client.health_check().await;

    assert_eq!(response, HealthResponse::offline());
    assert!(!client.is_api_healthy());
}

#[tokio::test]
async fn scenario_d_unauthorized_save() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/phase1/preferences"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;

    let client = client(&server.uri());
    let request = PreferencesRequest::new(vec![Preference::new("Salary", 9)], "x");
    let err = client.save_preferences(&request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.detail(), "token expired");
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn scenario_e_no_response_times_out_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/phase0/factors"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"factors": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = client(&server.uri());
    let started = Instant::now();
    let err = client
        .get_factors(&FactorsRequest::new("x"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    assert!(started.elapsed() < Duration::from_secs(2));
}
