use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use courier::auth::oauth1;
use courier::client::encoding::percent;
use courier::{ApiClient, ClientConfig};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::{EnvFilter, Layer};
use wiremock::{MockServer, Request};

/// Install a test-friendly subscriber once per process. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Layer that records the message of every event it sees.
#[derive(Debug, Clone, Default)]
pub struct EventMessages(Arc<Mutex<Vec<String>>>);

impl EventMessages {
    pub fn count(&self, message: &str) -> usize {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.as_str() == message)
            .count()
    }
}

struct MessageVisitor<'a>(&'a mut Option<String>);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            *self.0 = Some(format!("{:?}", value));
        }
    }
}

impl<S: Subscriber> Layer<S> for EventMessages {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = None;
        event.record(&mut MessageVisitor(&mut message));
        if let Some(message) = message {
            self.0.lock().unwrap().push(message);
        }
    }
}

/// A client pointed at the mock server, with a short timeout.
pub fn client_for(server: &MockServer) -> ApiClient {
    init_tracing();
    let config = ClientConfig::builder()
        .with_timeout(Duration::from_secs(5))
        .build();
    ApiClient::with_config(server.uri(), config).expect("client should build")
}

/// All requests the server has seen so far.
pub async fn received(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled by default")
}

pub fn header(request: &Request, name: &str) -> Option<String> {
    request
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Parse `OAuth k="v", ...` into decoded pairs.
pub fn parse_oauth_header(value: &str) -> Vec<(String, String)> {
    let fields = value
        .strip_prefix("OAuth ")
        .expect("header should use the OAuth scheme");

    fields
        .split(", ")
        .map(|field| {
            let (key, quoted) = field.split_once('=').expect("field should be key=value");
            let raw = quoted.trim_matches('"');
            (
                percent::decode(key).expect("key should decode"),
                percent::decode(raw).expect("value should decode"),
            )
        })
        .collect()
}

pub fn oauth_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

/// Recompute the signature of a received request and compare it with the
/// one it carries.
pub fn assert_signature_valid(request: &Request, consumer_secret: &str, token_secret: &str) {
    let authorization = header(request, "authorization").expect("request should be signed");
    let params = parse_oauth_header(&authorization);

    let signature = oauth_param(&params, "oauth_signature")
        .expect("header should carry oauth_signature")
        .to_string();

    let sent_url = sent_url(request);
    let (base_url, query) = oauth1::split_url(&sent_url).expect("url should parse");
    let mut signed: Vec<(String, String)> = params
        .into_iter()
        .filter(|(k, _)| k != "oauth_signature")
        .collect();
    signed.extend(query);

    if header(request, "content-type").is_some_and(|ct| oauth1::is_form_content_type(&ct)) {
        signed.extend(oauth1::form_parameters(&request.body));
    }

    let expected = oauth1::sign(
        request.method.as_str(),
        &base_url,
        &signed,
        consumer_secret,
        token_secret,
    )
    .expect("signing should succeed");

    assert_eq!(signature, expected, "signature mismatch for {}", sent_url);
}

/// The URL as the client addressed it. Wiremock reports `request.url` with a
/// `localhost` authority, so the host comes from the `Host` header instead.
pub fn sent_url(request: &Request) -> String {
    let host = header(request, "host").expect("request should carry a Host header");
    let mut url = format!("http://{}{}", host, request.url.path());
    if let Some(query) = request.url.query() {
        url.push('?');
        url.push_str(query);
    }
    url
}
