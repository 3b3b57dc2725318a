use std::time::Duration;

use courier::{ApiClient, ClientConfig, ErrorKind, RequestMethod};
use serde::Deserialize;
use serde_json::json;
use tracing_subscriber::layer::SubscriberExt;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{client_for, received, EventMessages};

#[derive(Debug, Deserialize)]
struct LoginResult {
    token: String,
    status: String,
}

#[tokio::test]
async fn test_relative_endpoint_joins_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Account/v1/Login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"userName": "user", "password": "pass"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"token": "t-1", "status": "Success"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .post("/Account/v1/Login")
        .json(&json!({"userName": "user", "password": "pass"}))
        .unwrap()
        .execute()
        .await
        .unwrap();

    assert!(response.is_success());
    assert!(response.error_message().is_none());
    let login: LoginResult = response.json().unwrap();
    assert_eq!(login.token, "t-1");
    assert_eq!(login.status, "Success");
}

#[tokio::test]
async fn test_absolute_endpoint_used_verbatim() {
    let primary = MockServer::start().await;
    let other = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(ResponseTemplate::new(200).set_body_string("other"))
        .expect(1)
        .mount(&other)
        .await;

    let response = client_for(&primary)
        .get(format!("{}/x", other.uri()))
        .execute()
        .await
        .unwrap();

    assert_eq!(response.text().unwrap(), "other");
    assert!(received(&primary).await.is_empty());
}

#[tokio::test]
async fn test_query_and_headers_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/BookStore/v1/Books"))
        .and(query_param("page", "2"))
        .and(query_param("q", "rust & c"))
        .and(header("x-suite", "override"))
        .and(header("x-build", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"books": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)
        .with_default_header("X-Suite", "smoke")
        .with_default_header("X-Build", "42");

    let response = client
        .request(RequestMethod::Get, "BookStore/v1/Books")
        .query("page", "2")
        .query("q", "rust & c")
        .header("x-suite", "override")
        .execute()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.content_type(), Some("application/json"));
}

#[tokio::test]
async fn test_text_body_overrides_default_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/notes/1"))
        .and(header("content-type", "text/plain"))
        .and(body_string("hello"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .put("/notes/1")
        .text("hello")
        .execute()
        .await
        .unwrap();

    assert_eq!(response.status(), 204);
    assert!(response.body().is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_a_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Account/v1/User"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"code": "1200", "message": "bad"})),
        )
        .mount(&server)
        .await;

    let response = client_for(&server)
        .post("/Account/v1/User")
        .json(&json!({}))
        .unwrap()
        .execute()
        .await
        .unwrap();

    assert!(!response.is_success());
    assert_eq!(response.status(), 400);
    assert_eq!(response.error_message(), Some("HTTP 400 Bad Request"));
    assert_eq!(response.json::<serde_json::Value>().unwrap()["code"], "1200");

    let err: courier::Error = response.ensure_success().unwrap_err().into();
    assert_eq!(err.status(), Some(400));
    assert!(matches!(err.kind, ErrorKind::NonSuccessResponse { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    crate::common::init_tracing();
    let client = ApiClient::new(format!("http://127.0.0.1:{}", port)).unwrap();
    let err = client.get("/anything").execute().await.unwrap_err();

    assert!(err.is_transport());
    assert!(!err.is_configuration());
    assert!(err.source.is_some());
}

#[tokio::test]
async fn test_timeout_is_transport_error_and_client_stays_usable() {
    let server = MockServer::start().await;
    Mock::given(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;
    Mock::given(path("/fast"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client
        .get("/slow")
        .timeout(Duration::from_millis(100))
        .execute()
        .await
        .unwrap_err();
    assert!(err.is_transport());

    let response = client.get("/fast").execute().await.unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn test_config_timeout_applies_without_override() {
    let server = MockServer::start().await;
    Mock::given(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .with_timeout(Duration::from_millis(100))
        .build();
    let client = ApiClient::with_config(server.uri(), config).unwrap();

    let err = client.get("/slow").execute().await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_each_request_logs_send_and_response_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let client = client_for(&server).set_bearer_authentication("tok");

    let messages = EventMessages::default();
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(messages.clone()));

    client.get("/ping").execute().await.unwrap();

    assert_eq!(messages.count("Sending request"), 1);
    assert_eq!(messages.count("Response received"), 1);
    assert_eq!(messages.count("Applied authentication"), 1);
}
