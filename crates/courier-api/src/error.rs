//! Error types for courier-api.
//!
//! Errors from the lower crates are folded into four kinds so callers can
//! tell a misconfigured client from a network failure without matching on
//! every underlying variant.

/// Result type alias for courier-api operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for courier-api operations.
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

    /// Returns true if the request was rejected before any network activity.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, ErrorKind::Configuration(_))
    }

    /// Returns true if no HTTP response was obtained.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_))
    }

    /// Returns the status code if this error wraps a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::NonSuccessResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Missing or invalid credentials, or a URL that cannot be used.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// DNS failure, refused connection, timeout, or a broken stream.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A non-2xx response, raised only when the caller asks for it.
    #[error("Non-success response: {status} {message}")]
    NonSuccessResponse { status: u16, message: String },

    /// Any other client-side failure, such as body serialization.
    #[error("Client error: {0}")]
    Client(String),
}

impl From<courier_auth::Error> for Error {
    fn from(err: courier_auth::Error) -> Self {
        Error::with_source(ErrorKind::Configuration(err.to_string()), err)
    }
}

impl From<courier_client::Error> for Error {
    fn from(err: courier_client::Error) -> Self {
        use courier_client::ErrorKind as ClientKind;

        let kind = match &err.kind {
            k if k.is_transport() => ErrorKind::Transport(err.to_string()),
            ClientKind::NonSuccessResponse { status, message } => ErrorKind::NonSuccessResponse {
                status: *status,
                message: message.clone(),
            },
            ClientKind::InvalidUrl(_) | ClientKind::Config(_) => {
                ErrorKind::Configuration(err.to_string())
            }
            _ => ErrorKind::Client(err.to_string()),
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Client(err.to_string()), err)
    }
}
