//! Turns a request spec into a response: authenticate, merge defaults, send.

use std::sync::Arc;

use courier_auth::AuthStrategy;
use courier_client::{Headers, RequestSpec, Response, Transport, TransportRequest};
use tracing::{instrument, warn};

use crate::error::Result;

/// Executes requests over a shared transport.
///
/// The executor never retries. Every HTTP status comes back as a
/// [`Response`]; only configuration problems and transport failures are
/// errors.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    default_headers: Headers,
}

impl RequestExecutor {
    /// An executor that sends through `transport`.
    pub fn new(transport: Arc<dyn Transport>, default_headers: Headers) -> Self {
        Self {
            transport,
            default_headers,
        }
    }

    /// Headers added to every request unless the request sets them.
    pub fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    /// Execute one request.
    ///
    /// `strategy` is applied first, so missing credentials fail before any
    /// I/O. Request headers (including the one the strategy adds) override
    /// default headers of the same name.
    #[instrument(
        skip_all,
        fields(method = %spec.method(), url = %spec.url(), auth = strategy.name())
    )]
    pub async fn execute(&self, spec: &RequestSpec, strategy: &AuthStrategy) -> Result<Response> {
        let authenticated = strategy.apply(spec)?;
        let headers = self.default_headers.merged_with(authenticated.headers());
        let request = TransportRequest::from_spec(&authenticated.with_headers(headers))?;

        // Send and response events come from the transport, under this span.
        self.transport.send(request).await.map_err(|err| {
            warn!(error = %err, "Request failed without a response");
            err.into()
        })
    }
}
