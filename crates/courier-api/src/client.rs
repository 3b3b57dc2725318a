//! The API client facade.
//!
//! An [`ApiClient`] binds a base URL, default headers, and an authentication
//! strategy to a shared transport. Auth and header setters return a new
//! client; the receiver is never modified, so one client per backend can be
//! cloned freely across tasks.

use std::sync::Arc;

use courier_auth::{AuthStrategy, Credentials};
use courier_client::{
    ClientConfig, Headers, HttpTransport, RequestMethod, RequestSpec, Response, Transport,
    DEFAULT_CONTENT_TYPE,
};
use tracing::instrument;

use crate::builder::RequestBuilder;
use crate::error::Result;
use crate::executor::RequestExecutor;

/// Immutable HTTP API client.
///
/// # Example
///
/// ```rust,ignore
/// use courier_api::ApiClient;
///
/// let client = ApiClient::new("https://demoqa.com")?
///     .set_basic_authentication("user", "pass");
///
/// let response = client.get("/BookStore/v1/Books").execute().await?;
/// assert!(response.is_success());
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    default_headers: Headers,
    auth: AuthStrategy,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client backed by a default-configured HTTP transport.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(base_url: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(base_url, Arc::new(transport)))
    }

    /// Create a client over any transport.
    pub fn with_transport(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            default_headers: Headers::new().with("Content-Type", DEFAULT_CONTENT_TYPE),
            auth: AuthStrategy::none(),
            transport,
        }
    }

    /// Base URL that relative endpoints are joined to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers sent with every request unless the request overrides them.
    pub fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    /// The active authentication strategy.
    pub fn auth(&self) -> &AuthStrategy {
        &self.auth
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// A client using the given strategy.
    pub fn with_auth(&self, strategy: AuthStrategy) -> Self {
        Self {
            auth: strategy,
            ..self.clone()
        }
    }

    /// A client using the given credentials with the system clock and
    /// random nonces.
    pub fn with_credentials(&self, credentials: Credentials) -> Self {
        self.with_auth(AuthStrategy::from_credentials(credentials))
    }

    /// HTTP Basic authentication.
    pub fn set_basic_authentication(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.with_auth(AuthStrategy::basic(username, password))
    }

    /// OAuth 1.0 signing with consumer credentials, for obtaining a request
    /// token.
    pub fn set_request_token_authentication(
        &self,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        self.with_auth(AuthStrategy::oauth1_request(consumer_key, consumer_secret))
    }

    /// OAuth 1.0 signing with an access token.
    pub fn set_access_token_authentication(
        &self,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        oauth_token: impl Into<String>,
        oauth_token_secret: impl Into<String>,
    ) -> Self {
        self.with_auth(AuthStrategy::oauth1_access(
            consumer_key,
            consumer_secret,
            oauth_token,
            oauth_token_secret,
        ))
    }

    /// `Authorization: Bearer <token>`.
    pub fn set_bearer_authentication(&self, token: impl Into<String>) -> Self {
        self.with_auth(AuthStrategy::bearer(token))
    }

    /// A token sent under a custom scheme, e.g. `Token abc`.
    pub fn set_bearer_authentication_with_scheme(
        &self,
        token: impl Into<String>,
        scheme: impl Into<String>,
    ) -> Self {
        self.with_auth(AuthStrategy::bearer_with_scheme(token, scheme))
    }

    /// A client that sends requests unauthenticated.
    pub fn clear_authentication(&self) -> Self {
        self.with_auth(AuthStrategy::none())
    }

    // =========================================================================
    // Default headers
    // =========================================================================

    /// A client that sends `name: value` on every request. Request headers
    /// still win.
    pub fn with_default_header(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut client = self.clone();
        client.default_headers.insert(name, value);
        client
    }

    /// A client without the named default header.
    pub fn without_default_header(&self, name: &str) -> Self {
        let mut client = self.clone();
        client.default_headers.remove(name);
        client
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Start a request with the given method and endpoint.
    pub fn request(&self, method: RequestMethod, endpoint: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(self.clone())
            .method(method)
            .endpoint(endpoint)
    }

    /// Start a GET request.
    pub fn get(&self, endpoint: impl Into<String>) -> RequestBuilder {
        self.request(RequestMethod::Get, endpoint)
    }

    /// Start a POST request.
    pub fn post(&self, endpoint: impl Into<String>) -> RequestBuilder {
        self.request(RequestMethod::Post, endpoint)
    }

    /// Start a PUT request.
    pub fn put(&self, endpoint: impl Into<String>) -> RequestBuilder {
        self.request(RequestMethod::Put, endpoint)
    }

    /// Start a PATCH request.
    pub fn patch(&self, endpoint: impl Into<String>) -> RequestBuilder {
        self.request(RequestMethod::Patch, endpoint)
    }

    /// Start a DELETE request.
    pub fn delete(&self, endpoint: impl Into<String>) -> RequestBuilder {
        self.request(RequestMethod::Delete, endpoint)
    }

    /// The executor for this client's transport and default headers.
    pub fn executor(&self) -> RequestExecutor {
        RequestExecutor::new(self.transport.clone(), self.default_headers.clone())
    }

    /// Execute a prepared spec with this client's authentication.
    #[instrument(skip_all)]
    pub async fn execute(&self, spec: &RequestSpec) -> Result<Response> {
        self.executor().execute(spec, &self.auth).await
    }
}
