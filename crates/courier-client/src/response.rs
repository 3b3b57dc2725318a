//! Uniform response envelope.
//!
//! Any HTTP status received from the server is a `Response`, never an error.
//! Callers that want "fail on non-2xx" semantics opt in with
//! [`Response::ensure_success`].

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, Result};
use crate::headers::Headers;

/// Normalized HTTP response: status, headers, and the fully read body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: u16,
    headers: Headers,
    body: Bytes,
    error_message: Option<String>,
}

impl Response {
    /// Build a response from its parts.
    pub fn new(status: u16, headers: Headers, body: impl Into<Bytes>) -> Self {
        let error_message = if is_success_status(status) {
            None
        } else {
            Some(status_message(status))
        };
        Self {
            status,
            headers,
            body: body.into(),
            error_message,
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        is_success_status(self.status)
    }

    /// Human-readable description of a non-2xx status, e.g.
    /// `HTTP 400 Bad Request`. `None` for successful responses.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// All response headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Raw body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume the response and return the body bytes.
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(|e| {
            Error::with_source(
                ErrorKind::Other("Failed to decode response as UTF-8".to_string()),
                e,
            )
        })
    }

    /// Deserialize the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }

    /// Convert a non-2xx response into a `NonSuccessResponse` error.
    pub fn ensure_success(self) -> Result<Self> {
        match self.error_message {
            None => Ok(self),
            Some(message) => Err(Error::new(ErrorKind::NonSuccessResponse {
                status: self.status,
                message,
            })),
        }
    }
}

fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

fn status_message(status: u16) -> String {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason());
    match reason {
        Some(reason) => format!("HTTP {} {}", status, reason),
        None => format!("HTTP {}", status),
    }
}
