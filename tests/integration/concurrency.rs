use std::collections::HashSet;

use wiremock::matchers::header_exists;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{assert_signature_valid, client_for, header, oauth_param, parse_oauth_header, received};

async fn signing_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_concurrent_oauth_clients_keep_their_own_credentials() {
    let server = signing_server().await;
    let base = client_for(&server);

    let alice = base.set_access_token_authentication("ck", "cs", "alice-token", "alice-secret");
    let bob = base.set_access_token_authentication("ck", "cs", "bob-token", "bob-secret");

    let (a, b) = futures::join!(
        alice.get("/timeline").query("user", "alice").execute(),
        bob.get("/timeline").query("user", "bob").execute(),
    );
    assert!(a.unwrap().is_success());
    assert!(b.unwrap().is_success());

    let requests = received(&server).await;
    assert_eq!(requests.len(), 2);

    let mut nonces = HashSet::new();
    for request in &requests {
        let params = parse_oauth_header(&header(request, "authorization").unwrap());
        let token = oauth_param(&params, "oauth_token").unwrap().to_string();
        let user = request
            .url
            .query_pairs()
            .find(|(k, _)| k == "user")
            .map(|(_, v)| v.into_owned())
            .unwrap();

        match token.as_str() {
            "alice-token" => {
                assert_eq!(user, "alice");
                assert_signature_valid(request, "cs", "alice-secret");
            }
            "bob-token" => {
                assert_eq!(user, "bob");
                assert_signature_valid(request, "cs", "bob-secret");
            }
            other => panic!("unexpected token {}", other),
        }

        nonces.insert(oauth_param(&params, "oauth_nonce").unwrap().to_string());
    }
    assert_eq!(nonces.len(), 2);

    assert!(base.auth().is_none());
}

#[tokio::test]
async fn test_client_is_shared_across_tasks() {
    let server = signing_server().await;
    let client = client_for(&server).set_request_token_authentication("ck", "cs");

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .post(format!("/items/{}", i))
                    .execute()
                    .await
                    .map(|r| r.status())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), 200);
    }

    let requests = received(&server).await;
    assert_eq!(requests.len(), 8);

    let nonces: HashSet<String> = requests
        .iter()
        .map(|r| {
            let params = parse_oauth_header(&header(r, "authorization").unwrap());
            assert_signature_valid(r, "cs", "");
            oauth_param(&params, "oauth_nonce").unwrap().to_string()
        })
        .collect();
    assert_eq!(nonces.len(), 8);
}
