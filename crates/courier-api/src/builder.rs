//! Fluent, value-semantics request builder.
//!
//! # Example
//!
//! ```rust,ignore
//! let response = client
//!     .post("/Account/v1/Login")
//!     .header("X-Trace", "smoke")
//!     .json(&serde_json::json!({"userName": "u", "password": "p"}))?
//!     .execute()
//!     .await?;
//! ```

use std::time::Duration;

use courier_client::encoding::url as url_encoding;
use courier_client::{Headers, RequestBody, RequestMethod, RequestSpec, Response, DEFAULT_CONTENT_TYPE};
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Result;

const CONTENT_TYPE: &str = "Content-Type";

/// Accumulates one request against an [`ApiClient`].
///
/// Every method consumes the builder and returns the updated value. Clone a
/// builder to fork independent requests from a shared prefix.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    client: ApiClient,
    method: RequestMethod,
    endpoint: String,
    headers: Headers,
    query: Vec<(String, String)>,
    body: Option<RequestBody>,
    timeout: Option<Duration>,
}

impl RequestBuilder {
    /// A GET request to the client's base URL.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            method: RequestMethod::default(),
            endpoint: String::new(),
            headers: Headers::new(),
            query: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    /// Set the HTTP method.
    pub fn method(mut self, method: RequestMethod) -> Self {
        self.method = method;
        self
    }

    /// A path relative to the base URL, or an absolute URL used verbatim.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set a header; names compare case-insensitively and the last write wins.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set a query parameter, replacing any earlier value for the same name.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.query.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.query.push((name, value)),
        }
        self
    }

    /// Set the body. The content type defaults to `application/json`.
    pub fn body(mut self, payload: impl Into<RequestBody>, content_type: Option<&str>) -> Self {
        self.body = Some(payload.into());
        self.headers
            .insert(CONTENT_TYPE, content_type.unwrap_or(DEFAULT_CONTENT_TYPE));
        self
    }

    /// Serialize `payload` as the JSON body.
    pub fn json<T: Serialize>(self, payload: &T) -> Result<Self> {
        let value = serde_json::to_value(payload)?;
        Ok(self.body(value, None))
    }

    /// Set a `text/plain` body.
    pub fn text(self, payload: impl Into<String>) -> Self {
        let text: String = payload.into();
        self.body(text, Some("text/plain"))
    }

    /// Set a raw body with an explicit content type.
    pub fn bytes(self, payload: impl Into<Vec<u8>>, content_type: &str) -> Self {
        let bytes: Vec<u8> = payload.into();
        self.body(bytes, Some(content_type))
    }

    /// Override the client timeout for this request only.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The URL this request will be sent to.
    pub fn url(&self) -> String {
        url_encoding::resolve(self.client.base_url(), &self.endpoint)
    }

    /// Freeze the accumulated state into a [`RequestSpec`].
    ///
    /// Client default headers and authentication are not included; they are
    /// added at execution time.
    pub fn build(&self) -> RequestSpec {
        let mut spec = RequestSpec::new(self.method, self.url());

        for (name, value) in &self.query {
            spec = spec.with_query(name.as_str(), value.as_str());
        }

        if let Some(body) = &self.body {
            let content_type = self.headers.get(CONTENT_TYPE);
            spec = spec.with_body(body.clone(), content_type);
        }

        // Builder headers, including the Content-Type chosen by `body`.
        let headers = spec.headers().merged_with(&self.headers);
        spec = spec.with_headers(headers);

        match self.timeout {
            Some(timeout) => spec.with_timeout(timeout),
            None => spec,
        }
    }

    /// Send the request with the client's authentication and default headers.
    pub async fn execute(self) -> Result<Response> {
        let spec = self.build();
        self.client.execute(&spec).await
    }
}
