//! # courier
//!
//! An immutable, fluent HTTP API client with pluggable authentication,
//! including OAuth 1.0 HMAC-SHA1 request signing.
//!
//! ## Security
//!
//! - Secrets are redacted in Debug output of credentials, strategies and headers
//! - Tracing records method, URL, status and strategy name, never header values
//! - Error messages name missing credential fields, never their values
//!
//! ## Crates
//!
//! - **courier-client** - Request and response values, header map, reqwest transport
//! - **courier-auth** - Credentials, Basic/Bearer/OAuth 1.0 strategies, signature engine
//! - **courier-api** - `ApiClient` facade, fluent `RequestBuilder`, `RequestExecutor`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::ApiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new("https://demoqa.com")?;
//!
//!     let login = client
//!         .post("/Account/v1/Login")
//!         .json(&serde_json::json!({"userName": "user", "password": "pass"}))?
//!         .execute()
//!         .await?;
//!
//!     println!("{} {}", login.status(), login.text()?);
//!
//!     let authed = client.set_basic_authentication("user", "pass");
//!     let books = authed.get("/BookStore/v1/Books").execute().await?;
//!     println!("{}", books.is_success());
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "api")]
pub use courier_api as api;
#[cfg(feature = "auth")]
pub use courier_auth as auth;
#[cfg(feature = "client")]
pub use courier_client as client;

// Re-export commonly used types at the top level
#[cfg(feature = "api")]
pub use courier_api::{ApiClient, Error, ErrorKind, RequestBuilder, RequestExecutor, Result};
#[cfg(feature = "auth")]
pub use courier_auth::{AuthStrategy, Credentials};
#[cfg(feature = "client")]
pub use courier_client::{ClientConfig, Headers, RequestMethod, RequestSpec, Response};
