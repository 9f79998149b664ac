//! Basic usage example: fetch the authenticated athlete and recent activities.

use strava_gateway::{ClientInit, Result, StravaClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("strava_gateway=info")
        .init();

    let init = StravaClient::builder()
        .client_id(std::env::var("STRAVA_CLIENT_ID").unwrap_or_default())
        .client_secret(std::env::var("STRAVA_CLIENT_SECRET").unwrap_or_default())
        .redirect_uri("http://localhost:8080/callback")
        .scope("view_private")
        .build()
        .await?;

    let client = match init {
        ClientInit::Ready(client) => client,
        ClientInit::NeedsAuthorization { authorize_url } => {
            println!("No token yet - authorize at:\n  {}", authorize_url);
            println!("Then re-run with the code (see the auth_flow example).");
            return Ok(());
        }
    };

    let athlete = client.get("athlete", &[]).await?;
    println!("Athlete: {}", athlete);

    let activities = client
        .get("athlete/activities", &[("per_page", "5")])
        .await?;
    println!("Recent activities: {}", activities);

    Ok(())
}
