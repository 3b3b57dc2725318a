//! Outbound transport seam and its reqwest implementation.
//!
//! The core only needs one capability from the network:
//! `send(method, url, headers, body) -> {status, headers, body}`. Anything
//! that implements [`Transport`] can carry requests; [`HttpTransport`] does it
//! with a pooled `reqwest::Client`.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::headers::Headers;
use crate::request::{RequestMethod, RequestSpec};
use crate::response::Response;

/// A fully resolved request, ready for the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: RequestMethod,
    pub url: String,
    pub headers: Headers,
    pub query: Vec<(String, String)>,
    pub body: Option<Bytes>,
    pub timeout: Option<Duration>,
}

impl TransportRequest {
    /// Flatten a request spec, serializing its body.
    pub fn from_spec(spec: &RequestSpec) -> Result<Self> {
        let body = spec.body().map(|b| b.to_bytes()).transpose()?;
        Ok(Self {
            method: spec.method(),
            url: spec.url().to_string(),
            headers: spec.headers().clone(),
            query: spec.query_params().to_vec(),
            body,
            timeout: spec.timeout(),
        })
    }

    /// The URL with query parameters appended.
    pub fn full_url(&self) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.url)?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }
}

/// Anything able to deliver a request and return the server's answer.
///
/// Implementations return `Ok` for every HTTP status and `Err` only when no
/// response was obtained.
pub trait Transport: Send + Sync + fmt::Debug {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<Response>>;
}

/// reqwest-backed transport with connection pooling.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Create a transport with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a transport with default configuration.
    pub fn default_transport() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute_once(&self, request: TransportRequest) -> Result<Response> {
        let url = request.full_url()?;
        let mut req = self.inner.request(request.method.to_reqwest(), url);

        for (name, value) in request.headers.iter() {
            req = req.header(name, value);
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        if self.config.enable_tracing {
            debug!("Sending request");
        }

        let response = req.send().await?;
        let status = response.status().as_u16();

        if self.config.enable_tracing {
            let content_length = response.content_length();
            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        let headers = collect_headers(response.headers());
        let body = response.bytes().await?;

        Ok(Response::new(status, headers, body))
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<Response>> {
        self.execute_once(request).boxed()
    }
}

/// Convert reqwest headers, joining repeated names with `, `. Values that are
/// not valid UTF-8 are decoded lossily.
fn collect_headers(map: &reqwest::header::HeaderMap) -> Headers {
    let mut headers = Headers::new();
    for (name, value) in map {
        let value = String::from_utf8_lossy(value.as_bytes());
        let joined = match headers.get(name.as_str()) {
            Some(existing) => format!("{}, {}", existing, value),
            None => value.to_string(),
        };
        headers.insert(name.as_str(), joined);
    }
    headers
}
