//! Credential values and their environment-variable loaders.
//!
//! All secret fields are redacted in Debug output.

use std::fmt;

use crate::error::{Error, ErrorKind, Result};

/// Environment variable holding the Basic username.
pub const ENV_USERNAME: &str = "COURIER_USERNAME";
/// Environment variable holding the Basic password.
pub const ENV_PASSWORD: &str = "COURIER_PASSWORD";
/// Environment variable holding a bearer token.
pub const ENV_BEARER_TOKEN: &str = "COURIER_BEARER_TOKEN";
/// Environment variable holding the OAuth 1.0 consumer key.
pub const ENV_CONSUMER_KEY: &str = "COURIER_CONSUMER_KEY";
/// Environment variable holding the OAuth 1.0 consumer secret.
pub const ENV_CONSUMER_SECRET: &str = "COURIER_CONSUMER_SECRET";
/// Environment variable holding the OAuth 1.0 access token.
pub const ENV_OAUTH_TOKEN: &str = "COURIER_OAUTH_TOKEN";
/// Environment variable holding the OAuth 1.0 access token secret.
pub const ENV_OAUTH_TOKEN_SECRET: &str = "COURIER_OAUTH_TOKEN_SECRET";

/// Default scheme for bearer tokens.
pub const DEFAULT_BEARER_SCHEME: &str = "Bearer";

/// Credentials for one authentication scheme.
///
/// Values are immutable once constructed; switching credentials means
/// building a new value.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Credentials {
    /// No authentication.
    #[default]
    None,
    /// HTTP Basic.
    Basic { username: String, password: String },
    /// A token sent as `Authorization: {scheme} {token}`.
    BearerToken { token: String, scheme: String },
    /// OAuth 1.0 consumer credentials, used to obtain a request token.
    OAuth1Request {
        consumer_key: String,
        consumer_secret: String,
    },
    /// OAuth 1.0 consumer plus access-token credentials.
    OAuth1Access {
        consumer_key: String,
        consumer_secret: String,
        oauth_token: String,
        oauth_token_secret: String,
    },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::None => f.write_str("None"),
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Credentials::BearerToken { scheme, .. } => f
                .debug_struct("BearerToken")
                .field("token", &"[REDACTED]")
                .field("scheme", scheme)
                .finish(),
            Credentials::OAuth1Request { consumer_key, .. } => f
                .debug_struct("OAuth1Request")
                .field("consumer_key", consumer_key)
                .field("consumer_secret", &"[REDACTED]")
                .finish(),
            Credentials::OAuth1Access { consumer_key, .. } => f
                .debug_struct("OAuth1Access")
                .field("consumer_key", consumer_key)
                .field("consumer_secret", &"[REDACTED]")
                .field("oauth_token", &"[REDACTED]")
                .field("oauth_token_secret", &"[REDACTED]")
                .finish(),
        }
    }
}

impl Credentials {
    /// HTTP Basic credentials.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// A bearer token with the default `Bearer` scheme.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::bearer_with_scheme(token, DEFAULT_BEARER_SCHEME)
    }

    /// A token with a custom scheme, e.g. `Token` or `JWT`.
    pub fn bearer_with_scheme(token: impl Into<String>, scheme: impl Into<String>) -> Self {
        Credentials::BearerToken {
            token: token.into(),
            scheme: scheme.into(),
        }
    }

    /// OAuth 1.0 consumer credentials.
    pub fn oauth1_request(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Credentials::OAuth1Request {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// OAuth 1.0 consumer and access-token credentials.
    pub fn oauth1_access(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        oauth_token: impl Into<String>,
        oauth_token_secret: impl Into<String>,
    ) -> Self {
        Credentials::OAuth1Access {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            oauth_token: oauth_token.into(),
            oauth_token_secret: oauth_token_secret.into(),
        }
    }

    /// Name of the scheme, for logs and error messages.
    pub fn scheme_name(&self) -> &'static str {
        match self {
            Credentials::None => "None",
            Credentials::Basic { .. } => "Basic",
            Credentials::BearerToken { .. } => "BearerHeader",
            Credentials::OAuth1Request { .. } => "OAuth1Request",
            Credentials::OAuth1Access { .. } => "OAuth1Access",
        }
    }

    /// Check that every required field is non-empty.
    ///
    /// Basic passwords may be empty; every other field is required.
    pub fn validate(&self) -> Result<()> {
        let name = self.scheme_name();
        let required: Vec<(&str, &str)> = match self {
            Credentials::None => vec![],
            Credentials::Basic { username, .. } => vec![("username", username)],
            Credentials::BearerToken { token, scheme } => {
                vec![("token", token), ("scheme", scheme)]
            }
            Credentials::OAuth1Request {
                consumer_key,
                consumer_secret,
            } => vec![
                ("consumer_key", consumer_key),
                ("consumer_secret", consumer_secret),
            ],
            Credentials::OAuth1Access {
                consumer_key,
                consumer_secret,
                oauth_token,
                oauth_token_secret,
            } => vec![
                ("consumer_key", consumer_key),
                ("consumer_secret", consumer_secret),
                ("oauth_token", oauth_token),
                ("oauth_token_secret", oauth_token_secret),
            ],
        };

        match required.into_iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(Error::missing_field(name, field)),
            None => Ok(()),
        }
    }

    /// Basic credentials from `COURIER_USERNAME` and `COURIER_PASSWORD`.
    pub fn basic_from_env() -> Result<Self> {
        Self::basic_from_lookup(env_lookup)
    }

    /// Bearer credentials from `COURIER_BEARER_TOKEN`.
    pub fn bearer_from_env() -> Result<Self> {
        Self::bearer_from_lookup(env_lookup)
    }

    /// Consumer credentials from `COURIER_CONSUMER_KEY` and
    /// `COURIER_CONSUMER_SECRET`.
    pub fn oauth1_request_from_env() -> Result<Self> {
        Self::oauth1_request_from_lookup(env_lookup)
    }

    /// Consumer and access-token credentials; additionally reads
    /// `COURIER_OAUTH_TOKEN` and `COURIER_OAUTH_TOKEN_SECRET`.
    pub fn oauth1_access_from_env() -> Result<Self> {
        Self::oauth1_access_from_lookup(env_lookup)
    }

    fn basic_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self::basic(
            required(&lookup, ENV_USERNAME)?,
            required(&lookup, ENV_PASSWORD)?,
        ))
    }

    fn bearer_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self::bearer(required(&lookup, ENV_BEARER_TOKEN)?))
    }

    fn oauth1_request_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self::oauth1_request(
            required(&lookup, ENV_CONSUMER_KEY)?,
            required(&lookup, ENV_CONSUMER_SECRET)?,
        ))
    }

    fn oauth1_access_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self::oauth1_access(
            required(&lookup, ENV_CONSUMER_KEY)?,
            required(&lookup, ENV_CONSUMER_SECRET)?,
            required(&lookup, ENV_OAUTH_TOKEN)?,
            required(&lookup, ENV_OAUTH_TOKEN_SECRET)?,
        ))
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String> {
    lookup(name).ok_or_else(|| Error::new(ErrorKind::EnvVar(name.to_string())))
}
