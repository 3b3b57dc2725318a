//! OAuth 1.0 signing walkthrough.
//!
//! Prints the signature base string and Authorization header for a request,
//! then sends it when `COURIER_DEMO_URL` is set.
//!
//! Credentials come from the environment:
//! - COURIER_CONSUMER_KEY, COURIER_CONSUMER_SECRET
//! - COURIER_OAUTH_TOKEN, COURIER_OAUTH_TOKEN_SECRET (optional; request-token signing without them)
//!
//! Run with: cargo run --example oauth1_signing

use courier::auth::oauth1;
use courier::{ApiClient, AuthStrategy, Credentials, RequestMethod, RequestSpec};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let credentials = Credentials::oauth1_access_from_env()
        .or_else(|_| Credentials::oauth1_request_from_env())?;
    println!("Credentials: {:?}\n", credentials);

    let target = std::env::var("COURIER_DEMO_URL")
        .unwrap_or_else(|_| "https://api.example.com/1.1/statuses/update.json".to_string());

    let spec = RequestSpec::new(RequestMethod::Post, &target).with_query("status", "Hello from courier");

    // Step 1: the canonical string that gets signed
    let base_url = oauth1::base_url(spec.url())?;
    println!(
        "Signature base string (without oauth_* params):\n{}\n",
        oauth1::signature_base_string("POST", &base_url, spec.query_params())
    );

    // Step 2: the header a strategy would attach
    let strategy = AuthStrategy::from_credentials(credentials);
    let signed = strategy.apply(&spec)?;
    println!(
        "Authorization: {}\n",
        signed.headers().get("Authorization").unwrap_or_default()
    );

    // Step 3: optionally send it
    if std::env::var("COURIER_DEMO_URL").is_ok() {
        let client = ApiClient::new(&target)?.with_auth(strategy);
        let response = client
            .post("")
            .query("status", "Hello from courier")
            .execute()
            .await?;
        println!("Status: {}", response.status());
        if let Some(message) = response.error_message() {
            println!("Error: {}", message);
        }
    }

    Ok(())
}
