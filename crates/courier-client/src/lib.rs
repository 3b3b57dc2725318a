//! # courier-client
//!
//! Core HTTP infrastructure for the courier API client.
//!
//! This crate provides the pieces that sit closest to the wire:
//! - `RequestSpec` - immutable description of one outgoing call
//! - `Headers` - ordered, case-insensitive header map
//! - `Response` - uniform envelope for any received HTTP status
//! - `Transport` - the single outbound capability, with a reqwest implementation
//! - RFC 3986 percent-encoding used by the OAuth 1.0 signer
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        courier-api                          │
//! │  ApiClient facade, RequestBuilder, RequestExecutor          │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                              │
//!                 ▼                              ▼
//! ┌───────────────────────────┐  ┌──────────────────────────────┐
//! │       courier-auth        │  │        courier-client        │
//! │  Credentials, strategies, │─▶│  RequestSpec, Headers,       │
//! │  OAuth 1.0 signing        │  │  Response, Transport         │
//! └───────────────────────────┘  └──────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use courier_client::{HttpTransport, RequestMethod, RequestSpec, Transport, TransportRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), courier_client::Error> {
//!     let transport = HttpTransport::default_transport()?;
//!     let spec = RequestSpec::new(RequestMethod::Get, "https://demoqa.com/BookStore/v1/Books");
//!
//!     let response = transport.send(TransportRequest::from_spec(&spec)?).await?;
//!     println!("{} {}", response.status(), response.text()?);
//!     Ok(())
//! }
//! ```

mod config;
pub mod encoding;
mod error;
mod headers;
mod request;
mod response;
mod transport;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use headers::Headers;
pub use request::{RequestBody, RequestMethod, RequestSpec, DEFAULT_CONTENT_TYPE};
pub use response::Response;
pub use transport::{HttpTransport, Transport, TransportRequest};

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("courier/", env!("CARGO_PKG_VERSION"));
