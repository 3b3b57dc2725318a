use courier::auth::{oauth1, FixedClock, FixedNonce};
use courier::{AuthStrategy, Credentials};
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{assert_signature_valid, client_for, header as header_of, oauth_param, parse_oauth_header, received};

async fn ok_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_basic_authentication_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/BookStore/v1/Books"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .set_basic_authentication("user", "pass")
        .get("/BookStore/v1/Books")
        .execute()
        .await
        .unwrap();

    assert!(response.is_success());
}

#[tokio::test]
async fn test_bearer_authentication_header() {
    let server = MockServer::start().await;
    Mock::given(header("authorization", "Bearer abc.def"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .set_bearer_authentication("abc.def")
        .get("/me")
        .execute()
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cleared_authentication_sends_no_header() {
    let server = MockServer::start().await;
    Mock::given(path("/public"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client_for(&server)
        .set_bearer_authentication("abc")
        .clear_authentication()
        .get("/public")
        .execute()
        .await
        .unwrap();

    let requests = received(&server).await;
    assert_eq!(requests.len(), 1);
    assert!(header_of(&requests[0], "authorization").is_none());
}

#[tokio::test]
async fn test_request_token_signature_verifies() {
    let server = ok_server().await;
    let strategy = AuthStrategy::oauth1_request("ck", "cs")
        .with_clock(FixedClock(1_000_000_000))
        .with_nonce_source(FixedNonce::new("n1"));

    client_for(&server)
        .with_auth(strategy)
        .post("/oauth/request_token")
        .execute()
        .await
        .unwrap();

    let requests = received(&server).await;
    let params = parse_oauth_header(&header_of(&requests[0], "authorization").unwrap());

    assert_eq!(oauth_param(&params, "oauth_consumer_key"), Some("ck"));
    assert_eq!(oauth_param(&params, "oauth_nonce"), Some("n1"));
    assert_eq!(oauth_param(&params, "oauth_timestamp"), Some("1000000000"));
    assert_eq!(oauth_param(&params, "oauth_signature_method"), Some("HMAC-SHA1"));
    assert_eq!(oauth_param(&params, "oauth_version"), Some("1.0"));
    assert!(oauth_param(&params, "oauth_token").is_none());

    assert_signature_valid(&requests[0], "cs", "");
}

#[tokio::test]
async fn test_access_token_signature_covers_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/statuses/update.json"))
        .and(query_param("status", "Hello Ladies + Gentlemen, a signed OAuth request!"))
        .and(query_param("include_entities", "true"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .set_access_token_authentication("ck", "cs", "tok", "ts")
        .post("/1.1/statuses/update.json")
        .query("include_entities", "true")
        .query("status", "Hello Ladies + Gentlemen, a signed OAuth request!")
        .execute()
        .await
        .unwrap();

    let requests = received(&server).await;
    let params = parse_oauth_header(&header_of(&requests[0], "authorization").unwrap());
    assert_eq!(oauth_param(&params, "oauth_token"), Some("tok"));
    assert_eq!(oauth_param(&params, "oauth_nonce").map(str::len), Some(32));

    assert_signature_valid(&requests[0], "cs", "ts");
}

#[tokio::test]
async fn test_access_token_signature_covers_form_body() {
    let server = MockServer::start().await;
    let form = "status=Hello%20Ladies%20%2b%20Gentlemen%2c%20a%20signed%20OAuth%20request%21";
    Mock::given(method("POST"))
        .and(path("/1.1/statuses/update.json"))
        .and(query_param("include_entities", "true"))
        .and(header("content-type", oauth1::FORM_CONTENT_TYPE))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server).with_auth(
        AuthStrategy::oauth1_access("ck", "cs", "tok", "ts")
            .with_clock(FixedClock(1_318_622_958))
            .with_nonce_source(FixedNonce::new("n1")),
    );
    let update = client
        .post("/1.1/statuses/update.json")
        .query("include_entities", "true");

    update
        .clone()
        .body(form, Some(oauth1::FORM_CONTENT_TYPE))
        .execute()
        .await
        .unwrap();
    update
        .body(
            "status=Hello%20Ladies%20%2b%20Gentlemen",
            Some(oauth1::FORM_CONTENT_TYPE),
        )
        .execute()
        .await
        .unwrap();

    let requests = received(&server).await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, form.as_bytes());
    assert_eq!(requests[1].body, b"status=Hello%20Ladies%20%2b%20Gentlemen");
    assert_signature_valid(&requests[0], "cs", "ts");
    assert_signature_valid(&requests[1], "cs", "ts");

    // Same clock and nonce, different form pairs: different signatures.
    assert_ne!(
        header_of(&requests[0], "authorization"),
        header_of(&requests[1], "authorization")
    );
}

#[tokio::test]
async fn test_missing_credentials_fail_before_network() {
    let server = ok_server().await;
    let client = client_for(&server);

    let cases = [
        client.set_basic_authentication("", "pass"),
        client.set_bearer_authentication(""),
        client.set_request_token_authentication("ck", ""),
        client.set_access_token_authentication("ck", "cs", "tok", ""),
        client.with_credentials(Credentials::oauth1_request("", "cs")),
    ];

    for case in cases {
        let err = case.get("/anything").execute().await.unwrap_err();
        assert!(err.is_configuration(), "{:?}", err);
    }

    assert!(received(&server).await.is_empty());
}

#[tokio::test]
async fn test_error_messages_do_not_leak_secrets() {
    let server = ok_server().await;
    let err = client_for(&server)
        .set_access_token_authentication("ck", "super-secret-cs", "", "super-secret-ts")
        .get("/anything")
        .execute()
        .await
        .unwrap_err();

    let message = format!("{} {:?}", err, err);
    assert!(message.contains("oauth_token"));
    assert!(!message.contains("super-secret"));
}
