//! Request description as plain data.
//!
//! A `RequestSpec` captures one outgoing HTTP call before it is handed to a
//! transport. Every `with_*` method consumes the value and returns an updated
//! copy, so two requests forked from a clone never observe each other's
//! changes.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;

use crate::error::{Error, ErrorKind, Result};
use crate::headers::Headers;

/// Content type applied by `RequestSpec::with_body` and `RequestSpec::with_json` unless
/// one is given explicitly.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// HTTP request method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RequestMethod {
    /// Uppercase method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Delete => "DELETE",
        }
    }

    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(RequestMethod::Get),
            "POST" => Ok(RequestMethod::Post),
            "PUT" => Ok(RequestMethod::Put),
            "PATCH" => Ok(RequestMethod::Patch),
            "DELETE" => Ok(RequestMethod::Delete),
            other => Err(Error::new(ErrorKind::Config(format!(
                "Unsupported HTTP method: {}",
                other
            )))),
        }
    }
}

/// Request body content.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Text(String),
    Bytes(Bytes),
}

impl RequestBody {
    /// Serialize the body into the bytes put on the wire.
    pub fn to_bytes(&self) -> Result<Bytes> {
        match self {
            RequestBody::Json(value) => Ok(Bytes::from(serde_json::to_vec(value)?)),
            RequestBody::Text(text) => Ok(Bytes::from(text.clone())),
            RequestBody::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        RequestBody::Bytes(bytes)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Bytes(Bytes::from(bytes))
    }
}

/// Immutable description of one outgoing HTTP call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    method: RequestMethod,
    url: String,
    headers: Headers,
    query_params: Vec<(String, String)>,
    body: Option<RequestBody>,
    timeout: Option<Duration>,
}

impl RequestSpec {
    /// Create a new request for an absolute URL.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            query_params: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(RequestMethod::Get, url)
    }

    /// Set the HTTP method.
    pub fn with_method(mut self, method: RequestMethod) -> Self {
        self.method = method;
        self
    }

    /// Set a header. An existing header with the same name (any casing) is
    /// replaced.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Replace all request-level headers.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Set a query parameter. An existing parameter with the same name is
    /// replaced.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.query_params.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.query_params.push((name, value)),
        }
        self
    }

    /// Set the body with an explicit content type, or `application/json`
    /// when `content_type` is `None`.
    pub fn with_body(mut self, body: impl Into<RequestBody>, content_type: Option<&str>) -> Self {
        self.body = Some(body.into());
        self.headers
            .insert("Content-Type", content_type.unwrap_or(DEFAULT_CONTENT_TYPE));
        self
    }

    /// Set a JSON body from any serializable value.
    pub fn with_json<T: Serialize>(self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        Ok(self.with_body(RequestBody::Json(value), None))
    }

    /// Set a plain text body.
    pub fn with_text(self, body: impl Into<String>) -> Self {
        self.with_body(RequestBody::Text(body.into()), Some("text/plain"))
    }

    /// Set a raw bytes body.
    pub fn with_bytes(self, body: impl Into<Bytes>, content_type: &str) -> Self {
        self.with_body(RequestBody::Bytes(body.into()), Some(content_type))
    }

    /// Set a timeout for this call only.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The absolute URL, as given.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request-level headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Query parameters in insertion order.
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query_params
    }

    /// The body, if one was set.
    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// The body content type, if one was set.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("Content-Type")
    }

    /// The per-call timeout, if one was set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
