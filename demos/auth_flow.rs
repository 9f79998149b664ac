//! OAuth authorization flow example.
//!
//! Demonstrates the full token lifecycle:
//!
//! - Building a client with no token (yields the authorization URL)
//! - Rebuilding with the code from the provider's callback
//! - Token caching across runs
//!
//! # Running
//!
//! ```bash
//! STRAVA_CLIENT_ID=42 STRAVA_CLIENT_SECRET=... cargo run --example auth_flow
//! ```
//!
//! On the first run you are given an authorization URL; paste the `code`
//! query parameter from the callback when prompted. Subsequent runs reuse
//! the cached token until the API rejects it.

use std::io::Write;

use strava_gateway::{ClientInit, Result, StravaClient};

fn builder() -> strava_gateway::StravaClientBuilder {
    StravaClient::builder()
        .client_id(std::env::var("STRAVA_CLIENT_ID").unwrap_or_default())
        .client_secret(std::env::var("STRAVA_CLIENT_SECRET").unwrap_or_default())
        .redirect_uri("http://localhost:8080/callback")
        .scope("view_private")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("strava_gateway=debug")
        .init();

    println!("=== strava-gateway: OAuth Flow Example ===\n");

    let client = match builder().build().await? {
        ClientInit::Ready(client) => {
            println!("Using cached or explicit token.");
            client
        }
        ClientInit::NeedsAuthorization { authorize_url } => {
            println!("Visit this URL and authorize the application:\n");
            println!("  {}\n", authorize_url);
            print!("Paste the `code` parameter from the callback: ");
            std::io::stdout().flush()?;

            let mut code = String::new();
            std::io::stdin().read_line(&mut code)?;

            // Rebuild with the one-time code; the exchanged token is cached.
            builder().authorization_code(code.trim()).build().await?.ready()?
        }
    };

    let athlete = client.get("athlete", &[]).await?;
    println!("\nAuthenticated as: {}", athlete["username"]);

    Ok(())
}
