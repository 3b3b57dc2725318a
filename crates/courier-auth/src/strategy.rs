//! Authentication strategies: how credentials become request headers.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use courier_client::{RequestBody, RequestSpec};
use tracing::debug;

use crate::credentials::Credentials;
use crate::entropy::{Clock, NonceSource, RandomNonce, SystemClock};
use crate::error::Result;
use crate::oauth1::{self, RequestSigner};

/// Name of the header every strategy writes.
pub const AUTHORIZATION: &str = "Authorization";

/// Turns a [`RequestSpec`] into an authenticated copy of itself.
///
/// A strategy pairs [`Credentials`] with the clock and nonce source used by
/// the OAuth 1.0 variants. Strategies are cheap to clone and never change
/// after construction; `with_*` methods return a new value.
#[derive(Clone)]
pub struct AuthStrategy {
    credentials: Credentials,
    clock: Arc<dyn Clock>,
    nonce_source: Arc<dyn NonceSource>,
}

impl fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthStrategy")
            .field("credentials", &self.credentials)
            .field("clock", &self.clock)
            .field("nonce_source", &self.nonce_source)
            .finish()
    }
}

impl Default for AuthStrategy {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Credentials> for AuthStrategy {
    fn from(credentials: Credentials) -> Self {
        Self::from_credentials(credentials)
    }
}

impl AuthStrategy {
    /// Wrap credentials with the system clock and a random nonce source.
    pub fn from_credentials(credentials: Credentials) -> Self {
        Self {
            credentials,
            clock: Arc::new(SystemClock),
            nonce_source: Arc::new(RandomNonce::default()),
        }
    }

    /// Leaves requests untouched.
    pub fn none() -> Self {
        Self::from_credentials(Credentials::None)
    }

    /// HTTP Basic authentication.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::from_credentials(Credentials::basic(username, password))
    }

    /// `Authorization: Bearer <token>`.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::from_credentials(Credentials::bearer(token))
    }

    /// A token sent under a custom scheme, e.g. `Token abc`.
    pub fn bearer_with_scheme(token: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self::from_credentials(Credentials::bearer_with_scheme(token, scheme))
    }

    /// OAuth 1.0 signing with consumer credentials only (request-token phase).
    pub fn oauth1_request(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self::from_credentials(Credentials::oauth1_request(consumer_key, consumer_secret))
    }

    /// OAuth 1.0 signing with an access token.
    pub fn oauth1_access(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        oauth_token: impl Into<String>,
        oauth_token_secret: impl Into<String>,
    ) -> Self {
        Self::from_credentials(Credentials::oauth1_access(
            consumer_key,
            consumer_secret,
            oauth_token,
            oauth_token_secret,
        ))
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the nonce source.
    pub fn with_nonce_source(mut self, nonce_source: impl NonceSource + 'static) -> Self {
        self.nonce_source = Arc::new(nonce_source);
        self
    }

    /// The credentials this strategy applies.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Strategy name, safe to log.
    pub fn name(&self) -> &'static str {
        self.credentials.scheme_name()
    }

    /// True when requests are sent unauthenticated.
    pub fn is_none(&self) -> bool {
        matches!(self.credentials, Credentials::None)
    }

    /// Produce an authenticated copy of `spec`.
    ///
    /// The input is never modified. Empty required fields fail before any
    /// header is computed. OAuth variants draw a fresh nonce and timestamp on
    /// every call and sign over all query parameters, including pairs already
    /// embedded in the URL, plus the pairs of a form-encoded text or bytes
    /// body. The parameters and body stay where they are.
    pub fn apply(&self, spec: &RequestSpec) -> Result<RequestSpec> {
        self.credentials.validate()?;

        let value = match &self.credentials {
            Credentials::None => return Ok(spec.clone()),
            Credentials::Basic { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
            }
            Credentials::BearerToken { token, scheme } => format!("{} {}", scheme, token),
            Credentials::OAuth1Request {
                consumer_key,
                consumer_secret,
            } => self.oauth1_header(spec, RequestSigner::new(consumer_key, consumer_secret))?,
            Credentials::OAuth1Access {
                consumer_key,
                consumer_secret,
                oauth_token,
                oauth_token_secret,
            } => self.oauth1_header(
                spec,
                RequestSigner::new(consumer_key, consumer_secret)
                    .with_token(oauth_token, oauth_token_secret),
            )?,
        };

        debug!(strategy = self.name(), "Applied authentication");
        Ok(spec.clone().with_header(AUTHORIZATION, value))
    }

    fn oauth1_header(&self, spec: &RequestSpec, signer: RequestSigner<'_>) -> Result<String> {
        let nonce = self.nonce_source.nonce();
        let timestamp = self.clock.unix_seconds();
        signer.authorization_header(
            spec.method().as_str(),
            spec.url(),
            &signed_parameters(spec),
            &nonce,
            timestamp,
        )
    }
}

/// Query pairs plus the pairs of a form-encoded body.
fn signed_parameters(spec: &RequestSpec) -> Vec<(String, String)> {
    let mut parameters = spec.query_params().to_vec();

    if spec.content_type().is_some_and(oauth1::is_form_content_type) {
        match spec.body() {
            Some(RequestBody::Text(text)) => parameters.extend(oauth1::form_parameters(text.as_bytes())),
            Some(RequestBody::Bytes(bytes)) => parameters.extend(oauth1::form_parameters(bytes)),
            Some(RequestBody::Json(_)) | None => {}
        }
    }

    parameters
}
