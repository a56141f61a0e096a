use oura_client::http_client::ReqwestOuraClient;
use oura_client::{DateRange, MetricCategory, OuraApi, OuraError};
use secrecy::SecretString;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestOuraClient {
    ReqwestOuraClient::new(&server.uri(), SecretString::new("tok".into()))
}

fn june_week() -> DateRange {
    DateRange::from_optional(Some("2025-06-01"), Some("2025-06-07")).expect("range")
}

#[tokio::test]
async fn fetch_sends_bearer_token_and_date_params() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "data": [{"day": "2025-06-01", "score": 85}],
        "next_token": null
    });

    Mock::given(method("GET"))
        .and(path("/v2/usercollection/sleep"))
        .and(query_param("start_date", "2025-06-01"))
        .and(query_param("end_date", "2025-06-07"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let records = client_for(&server)
        .fetch(MetricCategory::Sleep, &june_week())
        .await
        .expect("records");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].day(), Some("2025-06-01"));

    // Exactly one outbound request per call, no retries.
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}

#[tokio::test]
async fn fetch_empty_data_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/usercollection/daily_activity"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"data": [], "next_token": null})),
        )
        .mount(&server)
        .await;

    let records = client_for(&server)
        .fetch(MetricCategory::DailyActivity, &june_week())
        .await
        .expect("records");
    assert!(records.is_empty());
}

#[tokio::test]
async fn fetch_preserves_api_record_order() {
    let server = MockServer::start().await;
    let body = serde_json::json!({"data": [
        {"day": "2025-06-02", "score": 70},
        {"day": "2025-06-01", "score": 90}
    ]});
    Mock::given(method("GET"))
        .and(path("/v2/usercollection/daily_readiness"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let records = client_for(&server)
        .fetch(MetricCategory::DailyReadiness, &june_week())
        .await
        .expect("records");
    assert_eq!(records[0].day(), Some("2025-06-02"));
    assert_eq!(records[1].day(), Some("2025-06-01"));
}

#[tokio::test]
async fn fetch_401_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/usercollection/sleep"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "invalid token"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(MetricCategory::Sleep, &june_week())
        .await
        .unwrap_err();
    match err {
        OuraError::Auth { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid token"));
        }
        other => panic!("expected Auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_403_also_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/usercollection/sleep"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(MetricCategory::Sleep, &june_week())
        .await
        .unwrap_err();
    assert!(matches!(err, OuraError::Auth { status: 403, .. }));
}

#[tokio::test]
async fn fetch_server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/usercollection/daily_readiness"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(MetricCategory::DailyReadiness, &june_week())
        .await
        .unwrap_err();
    match err {
        OuraError::Api { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("upstream broke"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_rate_limit_is_api_error_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/usercollection/heartrate"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(MetricCategory::HeartRate, &june_week())
        .await
        .unwrap_err();
    assert!(matches!(err, OuraError::Api { status: 429, .. }));
}

#[tokio::test]
async fn fetch_transport_failure_maps_to_transport_error() {
    // Bind-then-drop a listener to get a port that refuses connections.
    // (Dropped `MockServer`s return to wiremock's pool and keep listening.)
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        format!("http://{}", listener.local_addr().expect("addr"))
    };
    let client = ReqwestOuraClient::new(&uri, SecretString::new("tok".into()));

    let err = client
        .fetch(MetricCategory::Sleep, &june_week())
        .await
        .unwrap_err();
    assert!(matches!(err, OuraError::Transport(_)));
}

#[tokio::test]
async fn fetch_personal_info_bare_object_yields_single_record() {
    let server = MockServer::start().await;
    let body = serde_json::json!({"id": "u1", "age": 34, "email": "a@example.com"});
    Mock::given(method("GET"))
        .and(path("/v2/usercollection/personal_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let records = client_for(&server)
        .fetch(MetricCategory::PersonalInfo, &june_week())
        .await
        .expect("records");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("id").and_then(|v| v.as_str()), Some("u1"));
}

#[tokio::test]
async fn base_url_trailing_slash_is_handled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/usercollection/sleep"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})),
        )
        .mount(&server)
        .await;

    let base = format!("{}/", server.uri());
    let client = ReqwestOuraClient::new(&base, SecretString::new("tok".into()));
    client
        .fetch(MetricCategory::Sleep, &june_week())
        .await
        .expect("records");
}

#[tokio::test]
async fn test_connection_true_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/usercollection/personal_info"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "u1"})),
        )
        .mount(&server)
        .await;

    assert!(client_for(&server).test_connection().await);
}

#[tokio::test]
async fn test_connection_false_on_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/usercollection/personal_info"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(!client_for(&server).test_connection().await);
}

#[tokio::test]
async fn test_connection_false_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/usercollection/personal_info"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(!client_for(&server).test_connection().await);
}

#[tokio::test]
async fn test_connection_false_on_transport_failure() {
    // Bind-then-drop a listener to get a port that refuses connections.
    // (Dropped `MockServer`s return to wiremock's pool and keep listening.)
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        format!("http://{}", listener.local_addr().expect("addr"))
    };
    let client = ReqwestOuraClient::new(&uri, SecretString::new("tok".into()));
    assert!(!client.test_connection().await);
}
