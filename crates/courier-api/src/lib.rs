//! # courier-api
//!
//! Fluent request building and execution on top of `courier-client` and
//! `courier-auth`.
//!
//! ## Features
//!
//! - **ApiClient** - base URL, default headers and authentication bound to a shared transport
//! - **RequestBuilder** - value-semantics builder with endpoint resolution
//! - **RequestExecutor** - applies authentication, merges headers, sends, never retries
//!
//! ## Example
//!
//! ```rust,ignore
//! use courier_api::ApiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), courier_api::Error> {
//!     let client = ApiClient::new("https://api.example.com")?
//!         .set_access_token_authentication("ck", "cs", "token", "token_secret");
//!
//!     let response = client
//!         .post("/statuses/update.json")
//!         .query("status", "Hello")
//!         .execute()
//!         .await?;
//!
//!     if !response.is_success() {
//!         eprintln!("{}", response.error_message().unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```

mod builder;
mod client;
mod error;
mod executor;

pub use builder::RequestBuilder;
pub use client::ApiClient;
pub use error::{Error, ErrorKind, Result};
pub use executor::RequestExecutor;

// Types that appear in this crate's public signatures.
pub use courier_auth::{AuthStrategy, Credentials};
pub use courier_client::{ClientConfig, Headers, RequestBody, RequestMethod, RequestSpec, Response};
