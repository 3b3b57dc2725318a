//! Error types for courier-auth.
//!
//! Error messages name the offending field, never its value.

/// Result type alias for courier-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for courier-auth operations.
///
/// Every variant is a configuration problem detected before any network
/// activity.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Shorthand for a missing or empty credential field.
    pub(crate) fn missing_field(strategy: &str, field: &str) -> Self {
        Self::new(ErrorKind::InvalidCredentials(format!(
            "{} requires a non-empty {}",
            strategy, field
        )))
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// A required credential field is missing or empty.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Signature computation failed.
    #[error("Signature error: {0}")]
    Signature(String),

    /// The request URL cannot be signed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}
