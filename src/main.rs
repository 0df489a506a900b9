// SPDX-License-Identifier: MIT

//! Gallery API Server
//!
//! Authenticates users via Google OAuth and records their like/favorite/
//! comment interactions against externally hosted images.

use gallery_api::{
    config::Config,
    db::Database,
    services::{GoogleClient, SessionStore},
    AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Gallery API");

    // Open the database and apply the schema
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to open database");

    // Session store (opaque token -> user id)
    let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_secs));

    // Google OAuth client
    let google = GoogleClient::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        sessions,
        google,
    });

    // Build router
    let app = gallery_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gallery_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
