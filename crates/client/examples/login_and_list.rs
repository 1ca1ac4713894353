//! Example: Signing in and listing today's class schedule
//!
//! This example walks the full client lifecycle: build a client from
//! environment configuration, sign in (or reuse a persisted session),
//! list upcoming classes, and check session status.
//!
//! # Setup
//!
//! 1. Point the client at a backend: ```bash export
//!    CLUBFLOW_API_URL=https://api.clubflow.app ```
//!
//! 2. Provide credentials: ```bash export CLUBFLOW_EMAIL=owner@studio.example
//!    export CLUBFLOW_PASSWORD=... ```
//!
//! 3. Run this example: ```bash cargo run --example login_and_list ```
//!
//! Tokens are persisted to a file in the system temp directory, so a
//! second run reuses the stored session instead of signing in again.

use std::sync::Arc;

use clubflow_client::api::{ApiClient, AuthApi, ListQuery, SchedulesApi};
use clubflow_client::auth::{FileTokenStore, TokenStore};
use clubflow_client::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("ClubFlow Client Example");
    println!("=======================\n");

    let config = ClientConfig::from_env()?;
    println!("ℹ️  Backend: {}\n", config.base_url);

    let store = Arc::new(FileTokenStore::new(
        std::env::temp_dir().join("clubflow-demo-tokens.json"),
    ));
    let client = Arc::new(
        ApiClient::builder()
            .config(config)
            .token_store(store.clone())
            .build()?,
    );
    let auth = AuthApi::new(client.clone());

    if store.is_authenticated().await {
        println!("✓ Reusing stored session from a previous run");
    } else {
        let (email, password) = match (
            std::env::var("CLUBFLOW_EMAIL"),
            std::env::var("CLUBFLOW_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) => (email, password),
            _ => {
                println!("ℹ️  CLUBFLOW_EMAIL / CLUBFLOW_PASSWORD not set, cannot sign in");
                println!("   To use: export CLUBFLOW_EMAIL=owner@studio.example");
                println!("           export CLUBFLOW_PASSWORD=...");
                return Ok(());
            }
        };

        let user = auth.login(&email, &password).await?;
        println!("✓ Signed in as {} ({})", user.full_name(), user.email);
    }

    // List classes starting today. A stale access token is handled
    // transparently: the client refreshes once and retries.
    let today = chrono::Utc::now().date_naive();
    let schedules = SchedulesApi::new(client.clone());
    let page = schedules
        .list(&ListQuery::new().filter("date_from", today))
        .await?;

    println!("\n📅 {} upcoming classes:", page.count);
    for class in &page.results {
        println!(
            "   {} {} with {} ({}/{} booked)",
            class.starts_at.format("%a %H:%M"),
            class.name,
            class.trainer_name,
            class.booked_count,
            class.capacity
        );
    }

    let status = auth.status().await?;
    println!("\n✓ Session active: {}", status.authenticated);
    println!("  Tokens are stored for the next run; call logout() to end the session.");

    Ok(())
}
