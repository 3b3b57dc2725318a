//! # courier-auth
//!
//! Authentication strategies for the courier API client.
//!
//! ## Security
//!
//! - Secrets (passwords, tokens, consumer and token secrets) are redacted in Debug output
//! - Tracing records the strategy name only, never header values
//! - Error messages name the offending field, never its value
//!
//! ## Supported Strategies
//!
//! - **None** - requests pass through unchanged
//! - **Basic** - `Authorization: Basic base64(username:password)`
//! - **BearerHeader** - `Authorization: {scheme} {token}`, scheme defaults to `Bearer`
//! - **OAuth1Request** - OAuth 1.0 HMAC-SHA1 signing with consumer credentials
//! - **OAuth1Access** - OAuth 1.0 signing with an access token as well
//!
//! ## Example
//!
//! ```rust,ignore
//! use courier_auth::{AuthStrategy, Credentials};
//! use courier_client::{RequestMethod, RequestSpec};
//!
//! fn main() -> Result<(), courier_auth::Error> {
//!     let strategy = AuthStrategy::from_credentials(Credentials::oauth1_access_from_env()?);
//!
//!     let spec = RequestSpec::new(RequestMethod::Post, "https://api.example.com/statuses")
//!         .with_query("status", "hello");
//!     let signed = strategy.apply(&spec)?;
//!     assert!(signed.headers().contains("Authorization"));
//!     Ok(())
//! }
//! ```

mod credentials;
mod entropy;
mod error;
pub mod oauth1;
mod strategy;

pub use credentials::{
    Credentials, DEFAULT_BEARER_SCHEME, ENV_BEARER_TOKEN, ENV_CONSUMER_KEY, ENV_CONSUMER_SECRET,
    ENV_OAUTH_TOKEN, ENV_OAUTH_TOKEN_SECRET, ENV_PASSWORD, ENV_USERNAME,
};
pub use entropy::{Clock, FixedClock, FixedNonce, NonceSource, RandomNonce, SystemClock, MIN_NONCE_BYTES};
pub use error::{Error, ErrorKind, Result};
pub use strategy::{AuthStrategy, AUTHORIZATION};
